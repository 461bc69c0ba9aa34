//! Repository for the `storage_areas` table.

use sqlx::PgPool;
use stockroom_core::types::DbId;

use crate::models::storage_area::{CreateStorageArea, StorageArea};

const COLUMNS: &str =
    "id, code, name, description, is_active, deleted_at, created_at, updated_at";

/// Provides storage area lookups and seeding helpers.
pub struct StorageAreaRepo;

impl StorageAreaRepo {
    /// Insert a new storage area, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStorageArea,
    ) -> Result<StorageArea, sqlx::Error> {
        let query = format!(
            "INSERT INTO storage_areas (code, name, description, is_active)
             VALUES (UPPER(TRIM($1)), TRIM($2), TRIM(COALESCE($3, '')), COALESCE($4, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageArea>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a storage area that has not been soft-deleted.
    pub async fn find_active<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<StorageArea>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM storage_areas WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, StorageArea>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Soft-delete a storage area. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        deleted_by: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE storage_areas SET deleted_at = NOW(), deleted_by = $2 \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(deleted_by)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
