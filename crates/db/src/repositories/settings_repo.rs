//! Repository for the `app_settings` key/value table.

use sqlx::PgPool;
use stockroom_core::types::DbId;

use crate::models::setting::AppSetting;

/// Provides reads and upserts of individual settings.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Fetch a single setting value. `None` if the key has never been stored.
    pub async fn get<'e, E>(executor: E, key: &str) -> Result<Option<String>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, String>(
            "SELECT setting_value FROM app_settings WHERE setting_key = $1",
        )
        .bind(key)
        .fetch_optional(executor)
        .await
    }

    /// List every stored setting ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<AppSetting>, sqlx::Error> {
        sqlx::query_as::<_, AppSetting>(
            "SELECT setting_key, setting_value, updated_by, updated_at \
             FROM app_settings ORDER BY setting_key",
        )
        .fetch_all(pool)
        .await
    }

    /// Insert or replace a setting value.
    pub async fn upsert(
        pool: &PgPool,
        key: &str,
        value: &str,
        updated_by: Option<DbId>,
    ) -> Result<AppSetting, sqlx::Error> {
        sqlx::query_as::<_, AppSetting>(
            "INSERT INTO app_settings (setting_key, setting_value, updated_by)
             VALUES ($1, $2, $3)
             ON CONFLICT (setting_key) DO UPDATE SET
                setting_value = EXCLUDED.setting_value,
                updated_by = EXCLUDED.updated_by,
                updated_at = NOW()
             RETURNING setting_key, setting_value, updated_by, updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(updated_by)
        .fetch_one(pool)
        .await
    }
}
