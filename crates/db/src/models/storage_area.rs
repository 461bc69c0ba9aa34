//! Storage area model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// A row from the `storage_areas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StorageArea {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a storage area. The code is stored trimmed and uppercased.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStorageArea {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
}
