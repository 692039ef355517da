// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

/// Monta o router completo da loja.
pub fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route(
            "/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route(
            "/register",
            get(handlers::auth::register_form).post(handlers::auth::register),
        )
        .route("/logout", get(handlers::auth::logout));

    // Rotas que exigem usuário logado
    let user_routes = Router::new()
        .route("/checkout", get(handlers::sales::checkout))
        .route("/orders", get(handlers::sales::orders))
        .route("/basket", get(handlers::cart::basket))
        .route("/add-to-cart", post(handlers::cart::add_to_cart))
        .route("/remove-from-cart", post(handlers::cart::remove_from_cart))
        .route(
            "/add-product",
            get(handlers::inventory::add_product_form).post(handlers::inventory::add_product),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/", get(handlers::inventory::index))
        .route("/products", get(handlers::inventory::products))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/auth", auth_routes)
        .merge(user_routes)
        .nest_service(
            handlers::inventory::IMAGE_URL_PREFIX,
            ServeDir::new(&app_state.image_upload_folder),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
