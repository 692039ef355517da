// src/db/sales_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::sales::{PaymentMode, Sale, SaleData},
};

#[derive(Clone)]
pub struct SalesRepository {
    pool: SqlitePool,
}

impl SalesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  VENDAS
    // =========================================================================

    /// Abre a venda com total zero; o total é gravado depois das linhas.
    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        bought_by: i64,
        payment_mode: PaymentMode,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (bought_by, total, payment_mode, added_on)
            VALUES (?1, 0, ?2, ?3)
            RETURNING *
            "#,
        )
        .bind(bought_by)
        .bind(payment_mode)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    pub async fn add_sale_data<'e, E>(
        &self,
        executor: E,
        sale_id: i64,
        inventory_id: i64,
        quantity: i64,
        sale_price: f64,
    ) -> Result<SaleData, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let line = sqlx::query_as::<_, SaleData>(
            r#"
            INSERT INTO sale_data (sale_id, inventory_id, quantity, sale_price, added_on)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(inventory_id)
        .bind(quantity)
        .bind(sale_price)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(line)
    }

    pub async fn update_total<'e, E>(
        &self,
        executor: E,
        sale_id: i64,
        total: f64,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            "UPDATE sales SET total = ?2 WHERE id = ?1 RETURNING *",
        )
        .bind(sale_id)
        .bind(total)
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    pub async fn find_by_id(&self, sale_id: i64) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = ?1")
            .bind(sale_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sale)
    }

    pub async fn list_for_buyer(&self, bought_by: i64) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sales WHERE bought_by = ?1 ORDER BY id DESC",
        )
        .bind(bought_by)
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    pub async fn list_sale_data(&self, sale_id: i64) -> Result<Vec<SaleData>, AppError> {
        let lines = sqlx::query_as::<_, SaleData>(
            "SELECT * FROM sale_data WHERE sale_id = ?1 ORDER BY id",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }
}
