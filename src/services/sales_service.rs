// src/services/sales_service.rs

use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    common::error::AppError,
    db::{CartRepository, InventoryRepository, SalesRepository},
    models::{
        cart::Basket,
        sales::{PaymentMode, Sale, SaleDetail},
    },
};

#[derive(Clone)]
pub struct SalesService {
    sales_repo: SalesRepository,
    inventory_repo: InventoryRepository,
    cart_repo: CartRepository,
    pool: SqlitePool,
}

impl SalesService {
    pub fn new(
        sales_repo: SalesRepository,
        inventory_repo: InventoryRepository,
        cart_repo: CartRepository,
        pool: SqlitePool,
    ) -> Self {
        Self {
            sales_repo,
            inventory_repo,
            cart_repo,
            pool,
        }
    }

    /// Registra uma venda a partir de pares (produto, quantidade), numa transação.
    pub async fn add_sale(
        &self,
        line_items: &[(i64, i64)],
        buyer: Option<i64>,
        payment_mode: PaymentMode,
    ) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;
        let sale = self.record_sale(&mut tx, line_items, buyer, payment_mode).await?;
        tx.commit().await?;
        Ok(sale)
    }

    /// Fecha o carrinho do usuário: cria a venda e esvazia o carrinho.
    /// Tudo na mesma transação; se algo falhar, nada fica gravado.
    pub async fn checkout(&self, user_id: i64, payment_mode: PaymentMode) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let lines = self.cart_repo.list_for_user(&mut *tx, user_id).await?;
        let line_items = Basket::from_lines(lines).line_items();

        let sale = self
            .record_sale(&mut tx, &line_items, Some(user_id), payment_mode)
            .await?;

        for (product_id, _) in &line_items {
            self.cart_repo.delete_item(&mut *tx, user_id, *product_id).await?;
        }

        tx.commit().await?;

        tracing::info!(
            sale_id = sale.id,
            user_id,
            lines = line_items.len(),
            total = sale.total,
            "Order confirmed"
        );
        Ok(sale)
    }

    // Núcleo do registro de venda. Produtos inexistentes são ignorados em silêncio:
    // não somam no total e não geram linha. O total usa o preço promocional
    // unitário, sem multiplicar pela quantidade, e o estoque não é baixado.
    async fn record_sale(
        &self,
        conn: &mut SqliteConnection,
        line_items: &[(i64, i64)],
        buyer: Option<i64>,
        payment_mode: PaymentMode,
    ) -> Result<Sale, AppError> {
        let Some(buyer) = buyer else {
            return Err(AppError::MissingParameters);
        };
        if line_items.is_empty() {
            return Err(AppError::MissingParameters);
        }

        let sale = self.sales_repo.create_sale(&mut *conn, buyer, payment_mode).await?;

        let mut total = 0.0;
        for &(product_id, quantity) in line_items {
            let Some(product) = self.inventory_repo.find_by_id(&mut *conn, product_id).await? else {
                tracing::warn!(sale_id = sale.id, product_id, "Skipping unknown product in sale");
                continue;
            };

            total += product.promotion_price;
            self.sales_repo
                .add_sale_data(&mut *conn, sale.id, product.id, quantity, product.promotion_price)
                .await?;
        }

        self.sales_repo.update_total(&mut *conn, sale.id, total).await
    }

    pub async fn get_sale(&self, sale_id: i64) -> Result<Option<SaleDetail>, AppError> {
        let Some(sale) = self.sales_repo.find_by_id(sale_id).await? else {
            return Ok(None);
        };
        let products = self.sales_repo.list_sale_data(sale.id).await?;
        Ok(Some(SaleDetail { sale, products }))
    }

    /// Pedidos do usuário, do mais recente para o mais antigo.
    pub async fn sales_for_user(&self, user_id: i64) -> Result<Vec<SaleDetail>, AppError> {
        let sales = self.sales_repo.list_for_buyer(user_id).await?;

        let mut details = Vec::with_capacity(sales.len());
        for sale in sales {
            let products = self.sales_repo.list_sale_data(sale.id).await?;
            details.push(SaleDetail { sale, products });
        }
        Ok(details)
    }
}
