// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Papel do usuário dentro da loja
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
pub enum Role {
    Admin,
    #[default]
    Customer,
    Sales,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "0712345678")]
    pub phone: String,

    #[serde(skip_serializing)] // nunca expor o hash
    pub password_hash: String,

    #[schema(example = "Jane")]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: String,

    pub role: Role,
    pub added_on: DateTime<Utc>,
}

// Formulário de registro (campos opcionais: a ausência vira MissingParameters)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,

    #[validate(length(min = 6, max = 20, message = "The phone number must have between 6 and 20 characters."))]
    pub phone: Option<String>,

    #[validate(length(min = 6, message = "The password must have at least 6 characters."))]
    pub password: Option<String>,

    pub repeat_password: Option<String>,
}

// Formulário de login
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginUserPayload {
    pub phone: Option<String>,
    pub password: Option<String>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub message: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,   // id do usuário
    pub exp: usize,
    pub iat: usize,
}
