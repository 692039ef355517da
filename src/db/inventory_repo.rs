// src/db/inventory_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::inventory::{Product, WeightFilter},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    /// Lista os produtos, aplicando os limites de peso (inclusivos) que vierem.
    pub async fn get_all_products(&self, filter: WeightFilter) -> Result<Vec<Product>, AppError> {
        let query = match (filter.lower, filter.upper) {
            (Some(lower), Some(upper)) => sqlx::query_as::<_, Product>(
                "SELECT * FROM inventory WHERE weight BETWEEN ?1 AND ?2 ORDER BY id",
            )
            .bind(lower)
            .bind(upper),
            (Some(lower), None) => {
                sqlx::query_as::<_, Product>("SELECT * FROM inventory WHERE weight >= ?1 ORDER BY id")
                    .bind(lower)
            }
            (None, Some(upper)) => {
                sqlx::query_as::<_, Product>("SELECT * FROM inventory WHERE weight <= ?1 ORDER BY id")
                    .bind(upper)
            }
            (None, None) => sqlx::query_as::<_, Product>("SELECT * FROM inventory ORDER BY id"),
        };

        let products = query.fetch_all(&self.pool).await?;
        Ok(products)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM inventory WHERE id = ?1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(product)
    }

    // ---
    // Escrita
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        name: &str,
        slug: &str,
        image_url: &str,
        weight: f64,
        quantity: i64,
        original_price: f64,
        promotion_price: f64,
        description: Option<&str>,
        added_by: Option<i64>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO inventory (
                name, slug, image_url, weight, quantity,
                original_price, promotion_price, description, added_by, added_on
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(image_url)
        .bind(weight)
        .bind(quantity)
        .bind(original_price)
        .bind(promotion_price)
        .bind(description)
        .bind(added_by)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(product)
    }
}
