//! Repository for the append-only `stock_movements` log.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use stockroom_core::types::DbId;

use crate::models::stock_movement::{CreateStockMovement, MovementQuery, StockMovementDetail};

/// Joined select shared by single-row and list queries.
const DETAIL_SELECT: &str = "SELECT \
        sm.id, sm.movement_type, sm.quantity, sm.note, sm.reference, sm.created_at, \
        sm.item_id, i.sku AS item_sku, i.name AS item_name, \
        sm.from_storage_area_id, from_sa.name AS from_storage_area_name, \
        sm.to_storage_area_id, to_sa.name AS to_storage_area_name, \
        sm.created_by AS actor_id, u.name AS actor_name \
    FROM stock_movements sm \
    JOIN items i ON i.id = sm.item_id \
    LEFT JOIN storage_areas from_sa ON from_sa.id = sm.from_storage_area_id \
    LEFT JOIN storage_areas to_sa ON to_sa.id = sm.to_storage_area_id \
    LEFT JOIN users u ON u.id = sm.created_by";

/// A typed bind value for dynamically built filter queries.
enum BindValue {
    Text(String),
    Id(DbId),
    Date(NaiveDate),
}

/// Appends and reads movement records.
pub struct StockMovementRepo;

impl StockMovementRepo {
    /// Append a movement record and return it with its display joins.
    ///
    /// Runs on the caller's connection so the record commits or rolls back
    /// together with the ledger writes it describes.
    pub async fn append(
        conn: &mut PgConnection,
        input: &CreateStockMovement,
    ) -> Result<StockMovementDetail, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO stock_movements \
                (movement_type, item_id, from_storage_area_id, to_storage_area_id, \
                 quantity, note, reference, created_by) \
             VALUES ($1, $2, $3, $4, $5, TRIM($6), TRIM($7), $8) \
             RETURNING id",
        )
        .bind(input.movement_type.as_str())
        .bind(input.item_id)
        .bind(input.from_storage_area_id)
        .bind(input.to_storage_area_id)
        .bind(input.quantity)
        .bind(&input.note)
        .bind(&input.reference)
        .bind(input.created_by)
        .fetch_one(&mut *conn)
        .await?;

        Self::find_detail(&mut *conn, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Fetch one movement with item, area and actor names.
    pub async fn find_detail<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<StockMovementDetail>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!("{DETAIL_SELECT} WHERE sm.id = $1");
        sqlx::query_as::<_, StockMovementDetail>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List movements newest first, applying the optional filters.
    pub async fn list(
        pool: &PgPool,
        params: &MovementQuery,
    ) -> Result<Vec<StockMovementDetail>, sqlx::Error> {
        let (where_clause, bind_values, next_idx) = build_movement_filter(params);
        let query = format!(
            "{DETAIL_SELECT} {where_clause} ORDER BY sm.id DESC LIMIT ${next_idx}"
        );

        let mut q = sqlx::query_as::<_, StockMovementDetail>(&query);
        for bv in &bind_values {
            q = match bv {
                BindValue::Text(s) => q.bind(s),
                BindValue::Id(id) => q.bind(*id),
                BindValue::Date(d) => q.bind(*d),
            };
        }
        q = q.bind(params.effective_limit());
        q.fetch_all(pool).await
    }
}

/// Build the WHERE clause for a movement listing.
///
/// Returns the clause (empty when unfiltered), its bind values in order, and
/// the next free parameter index.
fn build_movement_filter(params: &MovementQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_values: Vec<BindValue> = Vec::new();
    let mut bind_idx = 1u32;

    if let Some(movement_type) = params.movement_type.as_deref().map(str::trim) {
        if !movement_type.is_empty() {
            conditions.push(format!("sm.movement_type = ${bind_idx}"));
            bind_values.push(BindValue::Text(movement_type.to_lowercase()));
            bind_idx += 1;
        }
    }

    if let Some(item_id) = params.item_id.filter(|id| *id > 0) {
        conditions.push(format!("sm.item_id = ${bind_idx}"));
        bind_values.push(BindValue::Id(item_id));
        bind_idx += 1;
    }

    if let Some(search) = params.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            conditions.push(format!(
                "(i.name ILIKE ${bind_idx} OR i.sku ILIKE ${bind_idx} \
                  OR sm.reference ILIKE ${bind_idx} OR sm.note ILIKE ${bind_idx} \
                  OR from_sa.name ILIKE ${bind_idx} OR to_sa.name ILIKE ${bind_idx})"
            ));
            bind_values.push(BindValue::Text(format!("%{search}%")));
            bind_idx += 1;
        }
    }

    if let Some(from) = params.date_from {
        conditions.push(format!("(sm.created_at AT TIME ZONE 'UTC')::date >= ${bind_idx}"));
        bind_values.push(BindValue::Date(from));
        bind_idx += 1;
    }

    if let Some(to) = params.date_to {
        conditions.push(format!("(sm.created_at AT TIME ZONE 'UTC')::date <= ${bind_idx}"));
        bind_values.push(BindValue::Date(to));
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}
