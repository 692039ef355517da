// src/handlers/inventory.rs

use std::{collections::HashMap, str::FromStr};

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        inventory::{NewProduct, Product, ProductListing, WeightFilter},
        FormDescription, MessageResponse,
    },
    services::{auth::present, inventory_service::positive},
    storage,
};

// Prefixo público das imagens enviadas (servidas a partir de IMAGE_UPLOAD_FOLDER)
pub const IMAGE_URL_PREFIX: &str = "/static/images";

// Campo vazio conta como ausente; valor inválido é erro do cliente.
fn parse_optional<T: FromStr>(field: &str, raw: Option<&str>) -> Result<Option<T>, AppError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| AppError::InvalidParameter(field.to_string())),
    }
}

fn text<'a>(fields: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    fields.get(key).map(String::as_str)
}

// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "Products",
    responses((status = 200, description = "Every product", body = Vec<Product>))
)]
pub async fn index(State(app_state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state
        .inventory_service
        .get_all_products(WeightFilter::default())
        .await?;
    Ok(Json(products))
}

// Chega como texto: campo vazio no formulário de filtro significa "sem limite"
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductsQuery {
    /// Minimum weight (inclusive)
    #[param(value_type = Option<f64>)]
    pub lower_limit: Option<String>,
    /// Maximum weight (inclusive)
    #[param(value_type = Option<f64>)]
    pub upper_limit: Option<String>,
}

// GET /products?lower_limit=&upper_limit=
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductsQuery),
    responses((status = 200, description = "Products within the weight range", body = ProductListing))
)]
pub async fn products(
    State(app_state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ProductListing>, AppError> {
    let filter = WeightFilter {
        lower: parse_optional("lower_limit", query.lower_limit.as_deref())?,
        upper: parse_optional("upper_limit", query.upper_limit.as_deref())?,
    };

    let products = app_state.inventory_service.get_all_products(filter).await?;

    Ok(Json(ProductListing {
        products,
        lower_limit: filter.lower,
        upper_limit: filter.upper,
    }))
}

// Documentação do formulário multipart do POST /add-product
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct AddProductForm {
    name: String,
    image_url: Option<String>,
    #[schema(format = Binary)]
    image_file: Option<String>,
    weight: f64,
    quantity: Option<i64>,
    price: f64,
    promotional_price: f64,
    description: Option<String>,
}

// GET /add-product
pub async fn add_product_form(_user: AuthenticatedUser) -> Json<FormDescription> {
    Json(FormDescription {
        action: "/add-product",
        method: "POST",
        fields: vec![
            "name",
            "image_url",
            "image_file",
            "weight",
            "quantity",
            "price",
            "promotional_price",
            "description",
        ],
    })
}

// POST /add-product
#[utoipa::path(
    post,
    path = "/add-product",
    tag = "Products",
    request_body(content = AddProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing parameters, bad price or bad image type", body = MessageResponse)
    ),
    security(("session" = []))
)]
pub async fn add_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut fields = HashMap::new();
    let mut image_file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image_file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            // Navegador manda a parte vazia quando nenhum arquivo foi escolhido
            if !file_name.is_empty() && !bytes.is_empty() {
                image_file = Some((file_name, bytes.to_vec()));
            }
        } else {
            fields.insert(name, field.text().await?);
        }
    }

    let mut new_product = NewProduct {
        name: text(&fields, "name").map(str::to_owned),
        image_url: text(&fields, "image_url").map(str::to_owned),
        weight: parse_optional("weight", text(&fields, "weight"))?,
        quantity: parse_optional("quantity", text(&fields, "quantity"))?.or(Some(1)),
        original_price: parse_optional("price", text(&fields, "price"))?,
        promotion_price: parse_optional("promotional_price", text(&fields, "promotional_price"))?,
        description: text(&fields, "description").map(str::to_owned),
        slug: None,
        added_by: Some(user.id),
    };

    // Valida antes de gravar qualquer arquivo
    let (Some(original), Some(promotion)) = (
        positive(new_product.original_price),
        positive(new_product.promotion_price),
    ) else {
        return Err(AppError::MissingParameters);
    };
    if present(new_product.name.as_deref()).is_none() || positive(new_product.weight).is_none() {
        return Err(AppError::MissingParameters);
    }
    if promotion > original {
        return Err(AppError::InvalidPromotionPrice);
    }

    // Sem URL, a imagem enviada é obrigatória
    if new_product.image_url.as_deref().is_none_or(|url| url.trim().is_empty()) {
        let Some((file_name, bytes)) = image_file else {
            return Err(AppError::MissingParameters);
        };
        let saved = storage::save_image(&app_state.image_upload_folder, &file_name, &bytes).await?;
        let stored_name = saved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        new_product.image_url = Some(format!("{}/{}", IMAGE_URL_PREFIX, stored_name));
    }

    let product = app_state.inventory_service.add_product(new_product).await?;

    Ok((StatusCode::CREATED, Json(product)))
}
