// src/handlers/sales.rs

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::sales::{CheckoutQuery, PaymentMode, Sale, SaleDetail},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
    pub sale: Sale,
}

// GET /checkout?payment=Mpesa
#[utoipa::path(
    get,
    path = "/checkout",
    tag = "Sales",
    params(CheckoutQuery),
    responses(
        (status = 200, description = "Basket turned into a sale", body = CheckoutResponse),
        (status = 400, description = "Empty basket or unknown payment mode")
    ),
    security(("session" = []))
)]
pub async fn checkout(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<CheckoutQuery>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let payment_mode = match query.payment.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(raw) => raw
            .parse::<PaymentMode>()
            .map_err(|_| AppError::InvalidParameter("payment".to_string()))?,
        None => PaymentMode::default(),
    };

    let sale = app_state.sales_service.checkout(user.id, payment_mode).await?;

    Ok(Json(CheckoutResponse {
        success: true,
        message: "Order confirmed!".to_string(),
        sale,
    }))
}

// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Sales",
    responses((status = 200, description = "The user's sales, newest first", body = Vec<SaleDetail>)),
    security(("session" = []))
)]
pub async fn orders(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<SaleDetail>>, AppError> {
    let orders = app_state.sales_service.sales_for_user(user.id).await?;
    Ok(Json(orders))
}
