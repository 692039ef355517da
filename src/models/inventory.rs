// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Produto (tabela 'inventory') ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = 1)]
    pub id: i64,
    pub added_by: Option<i64>,

    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = "Widget")]
    pub slug: String,

    #[schema(example = 1.5)]
    pub weight: f64,
    #[schema(example = 10)]
    pub quantity: i64,

    #[schema(example = 20.0)]
    pub original_price: f64,
    #[schema(example = 15.0)]
    pub promotion_price: f64,

    pub rating: Option<i64>,
    pub description: Option<String>,
    pub image_url: String,
    pub added_on: DateTime<Utc>,
}

/// Dados para cadastro de um produto. Os campos obrigatórios são `Option`
/// para que a ausência seja reportada como `MissingParameters`.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub weight: Option<f64>,
    pub quantity: Option<i64>,
    pub original_price: Option<f64>,
    pub promotion_price: Option<f64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub added_by: Option<i64>,
}

// Filtro de peso da listagem (limites inclusivos)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightFilter {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub products: Vec<Product>,
    pub lower_limit: Option<f64>,
    pub upper_limit: Option<f64>,
}
