//! Quantity ledger models.
//!
//! `inventory_levels` holds at most one row per (item, storage area). A pair
//! with no row has an implicit quantity of zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// A row from the `inventory_levels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryLevel {
    pub item_id: DbId,
    pub storage_area_id: DbId,
    pub quantity: Decimal,
    pub updated_at: Timestamp,
}

/// One cell of the item x storage-area quantity matrix.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LevelMatrixRow {
    pub item_id: DbId,
    pub sku: String,
    pub item_name: String,
    pub category: String,
    pub unit: String,
    pub reorder_level: Decimal,
    pub item_is_active: bool,
    pub storage_area_id: DbId,
    pub storage_area_code: String,
    pub storage_area_name: String,
    pub storage_area_is_active: bool,
    /// Zero when no ledger row exists for the pair.
    pub quantity: Decimal,
    /// Sum of the item's quantities across all areas.
    pub total_item_quantity: Decimal,
    pub last_level_update: Option<Timestamp>,
}

/// Filter parameters for the quantity matrix.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LevelQuery {
    /// Case-insensitive match on item name/SKU/category and area name/code.
    pub search: Option<String>,
    pub storage_area_id: Option<DbId>,
    /// Include inactive items and areas (default `false`).
    pub include_inactive: Option<bool>,
}
