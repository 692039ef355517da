// tests/common/mod.rs

#![allow(dead_code)]

use std::path::PathBuf;

use sqlx::SqlitePool;

use storefront::{
    config::AppState,
    db,
    models::{
        auth::User,
        inventory::{NewProduct, Product},
    },
};

pub const TEST_JWT_SECRET: &str = "test-secret";
pub const TEST_PASSWORD: &str = "hunter22";

// Estado completo sobre um banco em memória novo
pub async fn test_state() -> AppState {
    test_state_with_images(PathBuf::from("static/images")).await
}

pub async fn test_state_with_images(image_upload_folder: PathBuf) -> AppState {
    test_state_and_pool(image_upload_folder).await.0
}

// Devolve também a pool, para testes que mexem direto no schema
pub async fn test_state_and_pool(image_upload_folder: PathBuf) -> (AppState, SqlitePool) {
    let pool = db::connect_in_memory()
        .await
        .expect("in-memory database should open");

    let state = AppState::from_pool(pool.clone(), TEST_JWT_SECRET.to_string(), image_upload_folder)
        .with_bcrypt_cost(4);
    (state, pool)
}

pub async fn register_user(state: &AppState, phone: &str) -> User {
    state
        .auth_service
        .add_user(Some("Jane"), Some("Doe"), Some(phone), Some(TEST_PASSWORD))
        .await
        .expect("user should be created")
}

pub async fn add_product(state: &AppState, name: &str, original: f64, promotion: f64, weight: f64) -> Product {
    state
        .inventory_service
        .add_product(NewProduct {
            name: Some(name.to_string()),
            image_url: Some(format!("/static/images/{name}.png")),
            weight: Some(weight),
            quantity: Some(10),
            original_price: Some(original),
            promotion_price: Some(promotion),
            ..Default::default()
        })
        .await
        .expect("product should be created")
}
