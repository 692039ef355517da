// src/services/cart_service.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::CartRepository,
    models::cart::{Basket, CartItem},
};

#[derive(Clone)]
pub struct CartService {
    cart_repo: CartRepository,
    pool: SqlitePool,
}

impl CartService {
    pub fn new(cart_repo: CartRepository, pool: SqlitePool) -> Self {
        Self { cart_repo, pool }
    }

    /// Adiciona `quantity` unidades do produto ao carrinho do usuário.
    /// Produto ou quantidade ausentes (ou <= 0) viram `MissingParameters`.
    pub async fn add_to_cart(
        &self,
        user_id: i64,
        product_id: Option<i64>,
        quantity: Option<i64>,
    ) -> Result<CartItem, AppError> {
        let (Some(product_id), Some(quantity)) =
            (product_id.filter(|id| *id > 0), quantity.filter(|q| *q > 0))
        else {
            return Err(AppError::MissingParameters);
        };

        self.cart_repo
            .upsert_item(&self.pool, user_id, product_id, quantity)
            .await
            .map_err(|e| {
                // Produto inexistente cai aqui (foreign key)
                tracing::warn!(user_id, product_id, "Add to cart failed: {}", e);
                AppError::CartUpdateFailed
            })
    }

    /// Remove o produto do carrinho. `false` quando não havia essa linha.
    pub async fn remove_from_cart(&self, user_id: i64, product_id: i64) -> Result<bool, AppError> {
        self.cart_repo.delete_item(&self.pool, user_id, product_id).await
    }

    pub async fn get_cart_item(
        &self,
        user_id: i64,
        product_id: i64,
    ) -> Result<Option<CartItem>, AppError> {
        self.cart_repo.find_item(user_id, product_id).await
    }

    pub async fn basket(&self, user_id: i64) -> Result<Basket, AppError> {
        let lines = self.cart_repo.list_for_user(&self.pool, user_id).await?;
        Ok(Basket::from_lines(lines))
    }
}
