// src/models.rs

use serde::Serialize;
use utoipa::ToSchema;

pub mod auth;
pub mod cart;
pub mod inventory;
pub mod sales;

// Resposta padrão para ações sem payload (o antigo "flash")
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}

// Descreve um formulário (GET das rotas de formulário)
#[derive(Debug, Serialize, ToSchema)]
pub struct FormDescription {
    pub action: &'static str,
    pub method: &'static str,
    pub fields: Vec<&'static str>,
}
