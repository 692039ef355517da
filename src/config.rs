// src/config.rs

use std::{env, path::PathBuf};

use anyhow::Context;
use sqlx::SqlitePool;

use crate::{
    db::{self, CartRepository, InventoryRepository, SalesRepository, UserRepository},
    services::{
        auth::AuthService, cart_service::CartService, inventory_service::InventoryService,
        sales_service::SalesService,
    },
};

// Configuração lida do ambiente (.env é carregado antes)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub image_upload_folder: PathBuf,
    pub bind_address: String,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {value}"))?,
            Err(_) => 5,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://storefront.db?mode=rwc".to_string()),
            jwt_secret,
            image_upload_folder: env::var("IMAGE_UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/images")),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            db_max_connections,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub image_upload_folder: PathBuf,
    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub cart_service: CartService,
    pub sales_service: SalesService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = db::connect(&config.database_url, config.db_max_connections)
            .await
            .with_context(|| format!("Failed to connect to {}", config.database_url))?;

        tracing::info!("✅ Database connection established");

        db::MIGRATOR
            .run(&db_pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("✅ Database migrations applied");

        Ok(Self::from_pool(
            db_pool,
            config.jwt_secret.clone(),
            config.image_upload_folder.clone(),
        ))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: SqlitePool, jwt_secret: String, image_upload_folder: PathBuf) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let cart_repo = CartRepository::new(db_pool.clone());
        let sales_repo = SalesRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret, db_pool.clone());
        let inventory_service = InventoryService::new(inventory_repo.clone(), db_pool.clone());
        let cart_service = CartService::new(cart_repo.clone(), db_pool.clone());
        let sales_service =
            SalesService::new(sales_repo, inventory_repo, cart_repo, db_pool);

        Self {
            image_upload_folder,
            auth_service,
            inventory_service,
            cart_service,
            sales_service,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.auth_service = self.auth_service.with_bcrypt_cost(cost);
        self
    }
}
