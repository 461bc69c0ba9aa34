//! Item catalog model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// An item row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub reorder_level: Decimal,
    pub notes: String,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item. The SKU is stored trimmed and uppercased.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    /// Defaults to `unit`.
    pub unit: Option<String>,
    pub reorder_level: Option<Decimal>,
    pub notes: Option<String>,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
}
