//! Application settings model (key/value rows).

use serde::Serialize;
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// A row from the `app_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppSetting {
    pub setting_key: String,
    pub setting_value: String,
    pub updated_by: Option<DbId>,
    pub updated_at: Timestamp,
}
