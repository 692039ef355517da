// src/models/cart.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{inventory::Product, sales::PaymentMode};

// --- Item do carrinho (tabela 'cart_items') ---
// Existe no máximo uma linha por (user_id, inventory_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub user_id: i64,
    pub inventory_id: i64,
    #[schema(example = 2)]
    pub quantity: i64,
    pub amount: Option<f64>,
    pub added_on: DateTime<Utc>,
}

// Linha do carrinho já com o produto (JOIN explícito, sem lazy loading)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BasketLine {
    pub cart_item_id: i64,
    pub quantity: i64,
    pub product: Product,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    pub items: Vec<BasketLine>,
    pub total_without_promotion: f64,
    pub total_with_promotion: f64,
    pub payment_methods: Vec<PaymentMode>,
}

impl Basket {
    pub fn from_lines(items: Vec<BasketLine>) -> Self {
        let total_without_promotion = items
            .iter()
            .map(|line| line.product.original_price * line.quantity as f64)
            .sum();
        let total_with_promotion = items
            .iter()
            .map(|line| line.product.promotion_price * line.quantity as f64)
            .sum();

        Self {
            items,
            total_without_promotion,
            total_with_promotion,
            payment_methods: PaymentMode::ALL.to_vec(),
        }
    }

    /// Pares (produto, quantidade) no formato esperado pelo registro de venda.
    pub fn line_items(&self) -> Vec<(i64, i64)> {
        self.items
            .iter()
            .map(|line| (line.product.id, line.quantity))
            .collect()
    }
}

// Payload JSON do POST /add-to-cart
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartPayload {
    #[schema(example = 1)]
    pub product_id: Option<i64>,
    #[schema(example = 2)]
    pub quantity: Option<i64>,
}
