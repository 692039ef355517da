// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::register,

        // --- Products ---
        handlers::inventory::index,
        handlers::inventory::products,
        handlers::inventory::add_product,

        // --- Basket ---
        handlers::cart::add_to_cart,
        handlers::cart::remove_from_cart,
        handlers::cart::basket,

        // --- Sales ---
        handlers::sales::checkout,
        handlers::sales::orders,
    ),
    components(
        schemas(
            models::MessageResponse,
            models::FormDescription,

            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Products ---
            models::inventory::Product,
            models::inventory::ProductListing,
            handlers::inventory::AddProductForm,

            // --- Basket ---
            models::cart::CartItem,
            models::cart::BasketLine,
            models::cart::Basket,
            models::cart::AddToCartPayload,

            // --- Sales ---
            models::sales::PaymentMode,
            models::sales::SaleStatus,
            models::sales::Sale,
            models::sales::SaleData,
            models::sales::SaleDetail,
            handlers::sales::CheckoutResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Login, registration and session"),
        (name = "Products", description = "Product listing and creation"),
        (name = "Basket", description = "Shopping basket"),
        (name = "Sales", description = "Checkout and order history")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

// GET /api-docs/openapi.json
pub async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}
