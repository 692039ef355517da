// src/services.rs

pub mod auth;
pub mod cart_service;
pub mod inventory_service;
pub mod sales_service;
