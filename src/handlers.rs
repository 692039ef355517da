// src/handlers.rs

pub mod auth;
pub mod cart;
pub mod inventory;
pub mod sales;
