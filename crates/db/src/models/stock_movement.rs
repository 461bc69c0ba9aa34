//! Stock movement log models and DTOs.
//!
//! Movement rows are immutable once written; there is no update DTO.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::movement::MovementType;
use stockroom_core::types::{DbId, Timestamp};

/// Default number of rows returned by a movement listing.
pub const DEFAULT_MOVEMENT_LIMIT: i64 = 100;

/// Hard cap on rows returned by a movement listing.
pub const MAX_MOVEMENT_LIMIT: i64 = 500;

/// A movement row joined with display names for the item, areas and actor.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StockMovementDetail {
    pub id: DbId,
    pub movement_type: String,
    /// Signed quantity as recorded.
    pub quantity: Decimal,
    pub note: String,
    pub reference: String,
    pub created_at: Timestamp,
    pub item_id: DbId,
    pub item_sku: String,
    pub item_name: String,
    pub from_storage_area_id: Option<DbId>,
    pub from_storage_area_name: Option<String>,
    pub to_storage_area_id: Option<DbId>,
    pub to_storage_area_name: Option<String>,
    pub actor_id: Option<DbId>,
    pub actor_name: Option<String>,
}

/// DTO for appending a movement record.
#[derive(Debug, Clone)]
pub struct CreateStockMovement {
    pub movement_type: MovementType,
    pub item_id: DbId,
    pub from_storage_area_id: Option<DbId>,
    pub to_storage_area_id: Option<DbId>,
    pub quantity: Decimal,
    pub note: String,
    pub reference: String,
    pub created_by: Option<DbId>,
}

/// Filter parameters for listing movements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementQuery {
    pub movement_type: Option<String>,
    pub item_id: Option<DbId>,
    /// Case-insensitive match on item name/SKU, note, reference and area names.
    pub search: Option<String>,
    /// Inclusive lower bound on the UTC creation date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the UTC creation date.
    pub date_to: Option<NaiveDate>,
    /// Defaults to [`DEFAULT_MOVEMENT_LIMIT`], clamped to `1..=MAX_MOVEMENT_LIMIT`.
    pub limit: Option<i64>,
}

impl MovementQuery {
    /// The effective row limit after defaulting and clamping.
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_MOVEMENT_LIMIT)
            .clamp(1, MAX_MOVEMENT_LIMIT)
    }
}
