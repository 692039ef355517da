// src/handlers/cart.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        cart::{AddToCartPayload, Basket},
        MessageResponse,
    },
};

// POST /add-to-cart
#[utoipa::path(
    post,
    path = "/add-to-cart",
    tag = "Basket",
    request_body = AddToCartPayload,
    responses(
        (status = 200, description = "Product added (quantities accumulate)", body = MessageResponse),
        (status = 400, description = "Missing productId or quantity", body = MessageResponse),
        (status = 500, description = "Failed to add to cart", body = MessageResponse)
    ),
    security(("session" = []))
)]
pub async fn add_to_cart(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<AddToCartPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let item = app_state
        .cart_service
        .add_to_cart(user.id, payload.product_id, payload.quantity)
        .await?;

    tracing::debug!(user_id = user.id, product_id = item.inventory_id, quantity = item.quantity, "Basket updated");
    Ok(Json(MessageResponse::ok("Product added to cart")))
}

// POST /remove-from-cart
#[utoipa::path(
    post,
    path = "/remove-from-cart",
    tag = "Basket",
    request_body = AddToCartPayload,
    responses(
        (status = 200, description = "Product removed from the basket", body = MessageResponse),
        (status = 404, description = "Product was not in the basket", body = MessageResponse)
    ),
    security(("session" = []))
)]
pub async fn remove_from_cart(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<AddToCartPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let product_id = payload.product_id.ok_or(AppError::MissingParameters)?;

    if !app_state.cart_service.remove_from_cart(user.id, product_id).await? {
        return Err(AppError::NotInBasket);
    }

    Ok(Json(MessageResponse::ok("Product removed from cart")))
}

// GET /basket
#[utoipa::path(
    get,
    path = "/basket",
    tag = "Basket",
    responses((status = 200, description = "Basket lines and totals", body = Basket)),
    security(("session" = []))
)]
pub async fn basket(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Basket>, AppError> {
    let basket = app_state.cart_service.basket(user.id).await?;
    Ok(Json(basket))
}
