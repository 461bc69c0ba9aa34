//! Quantity ledger over the `inventory_levels` table.
//!
//! Every write goes through an upsert keyed on `(item_id, storage_area_id)`;
//! rows are never deleted here. Quantities are rounded to three decimals
//! before they are stored.

use rust_decimal::Decimal;
use sqlx::{Connection, PgConnection, PgPool};
use stockroom_core::error::CoreError;
use stockroom_core::ledger::next_quantity;
use stockroom_core::quantity::round_quantity;
use stockroom_core::types::DbId;

use crate::models::inventory::{InventoryLevel, LevelMatrixRow, LevelQuery};

/// Failure while adjusting a ledger row.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The adjustment was rejected by domain rules (insufficient stock).
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides reads and writes of current stock quantities.
pub struct InventoryRepo;

impl InventoryRepo {
    /// Current quantity for the pair, or zero when no row exists.
    pub async fn current_quantity<'e, E>(
        executor: E,
        item_id: DbId,
        storage_area_id: DbId,
    ) -> Result<Decimal, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let quantity = sqlx::query_scalar::<_, Decimal>(
            "SELECT quantity FROM inventory_levels \
             WHERE item_id = $1 AND storage_area_id = $2",
        )
        .bind(item_id)
        .bind(storage_area_id)
        .fetch_optional(executor)
        .await?;
        Ok(quantity.unwrap_or(Decimal::ZERO))
    }

    /// Lock the pair's row until the surrounding transaction ends and return
    /// its quantity.
    ///
    /// A missing row is first created at zero so there is always a row to
    /// lock; concurrent writers to a new pair queue behind the first.
    pub async fn lock_quantity(
        conn: &mut PgConnection,
        item_id: DbId,
        storage_area_id: DbId,
    ) -> Result<Decimal, sqlx::Error> {
        sqlx::query(
            "INSERT INTO inventory_levels (item_id, storage_area_id, quantity) \
             VALUES ($1, $2, 0) \
             ON CONFLICT (item_id, storage_area_id) DO NOTHING",
        )
        .bind(item_id)
        .bind(storage_area_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query_scalar::<_, Decimal>(
            "SELECT quantity FROM inventory_levels \
             WHERE item_id = $1 AND storage_area_id = $2 \
             FOR UPDATE",
        )
        .bind(item_id)
        .bind(storage_area_id)
        .fetch_one(&mut *conn)
        .await
    }

    /// Upsert the pair to an exact quantity, returning the stored value.
    ///
    /// No sign check happens here; the `set` movement validates its target
    /// before calling.
    pub async fn set_absolute<'e, E>(
        executor: E,
        item_id: DbId,
        storage_area_id: DbId,
        quantity: Decimal,
    ) -> Result<Decimal, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, Decimal>(
            "INSERT INTO inventory_levels (item_id, storage_area_id, quantity)
             VALUES ($1, $2, $3)
             ON CONFLICT (item_id, storage_area_id) DO UPDATE SET
                quantity = EXCLUDED.quantity,
                updated_at = NOW()
             RETURNING quantity",
        )
        .bind(item_id)
        .bind(storage_area_id)
        .bind(round_quantity(quantity))
        .fetch_one(executor)
        .await
    }

    /// Apply a signed delta to the pair and return the stored quantity.
    ///
    /// Fails with [`CoreError::InsufficientStock`] when the result would be
    /// negative and `allow_negative` is unset, or with
    /// [`CoreError::InvalidRequest`] when it leaves the storable range. A
    /// rejected adjustment writes nothing, not even the zero row.
    ///
    /// Runs in its own transaction, which becomes a savepoint when `conn` is
    /// already inside one.
    pub async fn adjust(
        conn: &mut PgConnection,
        item_id: DbId,
        storage_area_id: DbId,
        delta: Decimal,
        allow_negative: bool,
    ) -> Result<Decimal, LedgerError> {
        let mut tx = conn.begin().await?;
        let result: Result<Decimal, LedgerError> = async {
            let current = Self::lock_quantity(&mut *tx, item_id, storage_area_id).await?;
            let next = next_quantity(current, delta, allow_negative)?;
            Ok(Self::set_absolute(&mut *tx, item_id, storage_area_id, next).await?)
        }
        .await;

        match result {
            Ok(stored) => {
                tx.commit().await?;
                Ok(stored)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    /// Fetch the raw ledger row for a pair, if one exists.
    pub async fn find_level(
        pool: &PgPool,
        item_id: DbId,
        storage_area_id: DbId,
    ) -> Result<Option<InventoryLevel>, sqlx::Error> {
        sqlx::query_as::<_, InventoryLevel>(
            "SELECT item_id, storage_area_id, quantity, updated_at FROM inventory_levels \
             WHERE item_id = $1 AND storage_area_id = $2",
        )
        .bind(item_id)
        .bind(storage_area_id)
        .fetch_optional(pool)
        .await
    }

    /// Quantity matrix of every live item against every live storage area.
    ///
    /// Pairs without a ledger row report zero. Ordered by item name, then
    /// area name.
    pub async fn matrix(
        pool: &PgPool,
        params: &LevelQuery,
    ) -> Result<Vec<LevelMatrixRow>, sqlx::Error> {
        let mut conditions: Vec<String> = vec![
            "i.deleted_at IS NULL".to_string(),
            "sa.deleted_at IS NULL".to_string(),
        ];
        let mut bind_idx = 1u32;
        let mut search_bind: Option<String> = None;
        let mut area_bind: Option<DbId> = None;

        if !params.include_inactive.unwrap_or(false) {
            conditions.push("i.is_active AND sa.is_active".to_string());
        }

        if let Some(search) = params.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                conditions.push(format!(
                    "(i.name ILIKE ${bind_idx} OR i.sku ILIKE ${bind_idx} \
                      OR i.category ILIKE ${bind_idx} OR sa.name ILIKE ${bind_idx} \
                      OR sa.code ILIKE ${bind_idx})"
                ));
                bind_idx += 1;
                search_bind = Some(format!("%{search}%"));
            }
        }

        if let Some(area_id) = params.storage_area_id.filter(|id| *id > 0) {
            conditions.push(format!("sa.id = ${bind_idx}"));
            area_bind = Some(area_id);
        }

        let query = format!(
            "SELECT \
                i.id AS item_id, i.sku, i.name AS item_name, i.category, i.unit, \
                i.reorder_level, i.is_active AS item_is_active, \
                sa.id AS storage_area_id, sa.code AS storage_area_code, \
                sa.name AS storage_area_name, sa.is_active AS storage_area_is_active, \
                COALESCE(il.quantity, 0) AS quantity, \
                COALESCE(t.total_quantity, 0) AS total_item_quantity, \
                il.updated_at AS last_level_update \
             FROM items i \
             CROSS JOIN storage_areas sa \
             LEFT JOIN inventory_levels il \
                ON il.item_id = i.id AND il.storage_area_id = sa.id \
             LEFT JOIN ( \
                SELECT item_id, SUM(quantity) AS total_quantity \
                FROM inventory_levels GROUP BY item_id \
             ) t ON t.item_id = i.id \
             WHERE {} \
             ORDER BY i.name ASC, sa.name ASC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, LevelMatrixRow>(&query);
        if let Some(search) = search_bind {
            q = q.bind(search);
        }
        if let Some(area_id) = area_bind {
            q = q.bind(area_id);
        }
        q.fetch_all(pool).await
    }
}
