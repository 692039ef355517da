// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Tipo de erro único da aplicação. Cada falha da camada de dados é uma variante,
// então o chamador nunca confunde um erro com um dado válido.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing some required parameters")]
    MissingParameters,

    #[error("Folder not created")]
    FolderNotCreated,

    #[error("Invalid file type")]
    InvalidFileType,

    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid value for '{0}'")]
    InvalidParameter(String),

    #[error("Malformed form data: {0}")]
    InvalidMultipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Passwords don't match")]
    PasswordsDontMatch,

    #[error("Promotion price must be less than original price")]
    InvalidPromotionPrice,

    #[error("A user with this phone number already exists")]
    PhoneAlreadyExists,

    #[error("Check your phone or password and try again")]
    InvalidCredentials,

    #[error("Invalid or missing session token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to add to cart")]
    CartUpdateFailed,

    #[error("Product is not in the basket")]
    NotInBasket,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameters
            | AppError::InvalidFileType
            | AppError::ValidationError(_)
            | AppError::InvalidParameter(_)
            | AppError::InvalidMultipart(_)
            | AppError::PasswordsDontMatch
            | AppError::InvalidPromotionPrice => StatusCode::BAD_REQUEST,
            AppError::PhoneAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound | AppError::NotInBasket => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Detalhes por campo para erros do validator
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "success": false,
                "message": "One or more fields are invalid.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        let message = if status.is_server_error() {
            // A mensagem detalhada fica no log, não na resposta
            tracing::error!("Internal server error: {}", self);
            match self {
                AppError::CartUpdateFailed
                | AppError::FolderNotCreated => self.to_string(),
                _ => "Something went wrong".to_string(),
            }
        } else {
            self.to_string()
        };

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}
