// src/models/sales.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
pub enum PaymentMode {
    #[default]
    Mpesa,
    Bank,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 2] = [PaymentMode::Mpesa, PaymentMode::Bank];
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMode::Mpesa => f.write_str("Mpesa"),
            PaymentMode::Bank => f.write_str("Bank"),
        }
    }
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mpesa" => Ok(PaymentMode::Mpesa),
            "bank" => Ok(PaymentMode::Bank),
            other => Err(format!("Unknown payment mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
pub enum SaleStatus {
    Pending,
    Paid,
    Processing,
    Fulfilled,
    Refunded,
}

// --- Venda (tabela 'sales') ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub bought_by: i64,
    #[schema(example = 15.0)]
    pub total: f64,
    pub discount: f64,
    pub payment_mode: PaymentMode,
    pub status: SaleStatus,
    pub added_on: DateTime<Utc>,
}

// --- Linha da venda (tabela 'sale_data') ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleData {
    pub id: i64,
    pub sale_id: i64,
    pub inventory_id: i64,
    pub quantity: i64,
    pub sale_price: Option<f64>,
    pub discount: f64,
    pub added_on: DateTime<Utc>,
}

// Venda com suas linhas, para a listagem de pedidos
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub sale: Sale,
    pub products: Vec<SaleData>,
}

// GET /checkout?payment=Mpesa
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckoutQuery {
    /// `Mpesa` (default) or `Bank`
    pub payment: Option<String>,
}
