// src/services/inventory_service.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{NewProduct, Product, WeightFilter},
    services::auth::present,
};

/// Slug padrão: o nome com os espaços trocados por '-'.
pub fn slugify(name: &str) -> String {
    name.replace(' ', "-")
}

pub(crate) fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    pool: SqlitePool,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, pool: SqlitePool) -> Self {
        Self { inventory_repo, pool }
    }

    pub async fn get_all_products(&self, filter: WeightFilter) -> Result<Vec<Product>, AppError> {
        self.inventory_repo.get_all_products(filter).await
    }

    // --- CREATE PRODUCT ---
    // Peso, quantidade e preços zerados ou negativos contam como ausentes.
    pub async fn add_product(&self, new_product: NewProduct) -> Result<Product, AppError> {
        let (
            Some(name),
            Some(image_url),
            Some(weight),
            Some(quantity),
            Some(original_price),
            Some(promotion_price),
        ) = (
            present(new_product.name.as_deref()),
            present(new_product.image_url.as_deref()),
            positive(new_product.weight),
            new_product.quantity.filter(|q| *q > 0),
            positive(new_product.original_price),
            positive(new_product.promotion_price),
        )
        else {
            return Err(AppError::MissingParameters);
        };

        let slug = present(new_product.slug.as_deref())
            .map(str::to_owned)
            .unwrap_or_else(|| slugify(name));

        let product = self
            .inventory_repo
            .create_product(
                &self.pool,
                name,
                &slug,
                image_url,
                weight,
                quantity,
                original_price,
                promotion_price,
                new_product.description.as_deref(),
                new_product.added_by,
            )
            .await?;

        tracing::info!(product_id = product.id, slug = %product.slug, "Product created");
        Ok(product)
    }
}
