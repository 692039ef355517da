// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User},
};

// Trata strings vazias/em branco como ausentes
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    bcrypt_cost: u32,
    pool: SqlitePool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: SqlitePool) -> Self {
        Self {
            user_repo,
            jwt_secret,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            pool,
        }
    }

    // Custo menor deixa os testes rápidos
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Cadastra um usuário. Qualquer campo ausente vira `MissingParameters`;
    /// a senha só é gravada como hash bcrypt.
    pub async fn add_user(
        &self,
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AppError> {
        let (Some(first_name), Some(last_name), Some(phone), Some(password)) = (
            present(first_name),
            present(last_name),
            present(phone),
            password.filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::MissingParameters);
        };

        // Hashing fora do runtime async
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed_password = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))??;

        let user = self
            .user_repo
            .create_user(&self.pool, first_name, last_name, phone, &hashed_password)
            .await?;

        tracing::info!(user_id = user.id, "New user registered");
        Ok(user)
    }

    pub async fn get_user_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_phone(phone).await
    }

    /// Confere telefone e senha; devolve o usuário e um token de sessão.
    pub async fn login_user(
        &self,
        phone: Option<&str>,
        password: Option<&str>,
    ) -> Result<(User, String), AppError> {
        let (Some(phone), Some(password)) = (present(phone), password.filter(|p| !p.is_empty()))
        else {
            return Err(AppError::MissingParameters);
        };

        let user = self
            .user_repo
            .find_by_phone(phone)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))??;

        if !is_password_valid {
            tracing::debug!(phone, "Login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(user.id)?;
        Ok((user, token))
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub fn create_token(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
