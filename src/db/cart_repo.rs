// src/db/cart_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::{
        cart::{BasketLine, CartItem},
        inventory::Product,
    },
};

// Linha crua do JOIN cart_items x inventory
#[derive(FromRow)]
struct BasketRow {
    cart_item_id: i64,
    cart_quantity: i64,
    id: i64,
    added_by: Option<i64>,
    name: String,
    slug: String,
    weight: f64,
    quantity: i64,
    original_price: f64,
    promotion_price: f64,
    rating: Option<i64>,
    description: Option<String>,
    image_url: String,
    added_on: DateTime<Utc>,
}

impl From<BasketRow> for BasketLine {
    fn from(row: BasketRow) -> Self {
        BasketLine {
            cart_item_id: row.cart_item_id,
            quantity: row.cart_quantity,
            product: Product {
                id: row.id,
                added_by: row.added_by,
                name: row.name,
                slug: row.slug,
                weight: row.weight,
                quantity: row.quantity,
                original_price: row.original_price,
                promotion_price: row.promotion_price,
                rating: row.rating,
                description: row.description,
                image_url: row.image_url,
                added_on: row.added_on,
            },
        }
    }
}

#[derive(Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Adiciona ao carrinho. Se a linha (usuário, produto) já existe, soma a quantidade.
    pub async fn upsert_item<'e, E>(
        &self,
        executor: E,
        user_id: i64,
        inventory_id: i64,
        quantity: i64,
    ) -> Result<CartItem, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        // UPSERT atômico: sem ler-e-depois-escrever, sem atualização perdida.
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (user_id, inventory_id, quantity, added_on)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (user_id, inventory_id)
            DO UPDATE SET quantity = cart_items.quantity + excluded.quantity
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(inventory_id)
        .bind(quantity)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn find_item(
        &self,
        user_id: i64,
        inventory_id: i64,
    ) -> Result<Option<CartItem>, AppError> {
        let item = sqlx::query_as::<_, CartItem>(
            "SELECT * FROM cart_items WHERE user_id = ?1 AND inventory_id = ?2",
        )
        .bind(user_id)
        .bind(inventory_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    /// Remove a linha (usuário, produto). Retorna `false` se ela não existia.
    pub async fn delete_item<'e, E>(
        &self,
        executor: E,
        user_id: i64,
        inventory_id: i64,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?1 AND inventory_id = ?2")
            .bind(user_id)
            .bind(inventory_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_for_user<'e, E>(
        &self,
        executor: E,
        user_id: i64,
    ) -> Result<Vec<BasketLine>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, BasketRow>(
            r#"
            SELECT
                c.id AS cart_item_id,
                c.quantity AS cart_quantity,
                i.id, i.added_by, i.name, i.slug, i.weight, i.quantity,
                i.original_price, i.promotion_price, i.rating,
                i.description, i.image_url, i.added_on
            FROM cart_items c
            JOIN inventory i ON i.id = c.inventory_id
            WHERE c.user_id = ?1
            ORDER BY c.id
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(BasketLine::from).collect())
    }
}
