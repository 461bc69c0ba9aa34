//! Repository for the `items` table.

use sqlx::PgPool;
use stockroom_core::types::DbId;

use crate::models::item::{CreateItem, Item};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sku, name, category, unit, reorder_level, notes, is_active, \
    deleted_at, created_at, updated_at";

/// Provides catalog lookups and the seeding helpers used by tooling and tests.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (sku, name, category, unit, reorder_level, notes, is_active)
             VALUES (UPPER(TRIM($1)), TRIM($2), TRIM(COALESCE($3, '')), TRIM(COALESCE($4, 'unit')),
                     COALESCE($5, 0), TRIM(COALESCE($6, '')), COALESCE($7, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.unit)
            .bind(input.reorder_level)
            .bind(&input.notes)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find an item that has not been soft-deleted.
    ///
    /// Inactive items are returned; only deletion hides an item from movements.
    pub async fn find_active<'e, E>(executor: E, id: DbId) -> Result<Option<Item>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Soft-delete an item. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        deleted_by: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE items SET deleted_at = NOW(), deleted_by = $2 \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(deleted_by)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
