//! Handlers for the `/inventory` resource.
//!
//! Movements are the only write path into stock quantities; the level
//! endpoints are read-only views over the ledger.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use stockroom_core::error::CoreError;
use stockroom_core::movement::MovementRequest;
use stockroom_core::types::DbId;
use stockroom_db::models::inventory::{LevelMatrixRow, LevelQuery};
use stockroom_db::models::stock_movement::{MovementQuery, StockMovementDetail};
use stockroom_db::repositories::{InventoryRepo, ItemRepo, StockMovementRepo, StorageAreaRepo};

use crate::engine::MovementOutcome;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireReader, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// Quantity currently held for one item in one storage area.
#[derive(Debug, Serialize)]
pub struct CurrentLevel {
    pub item_id: DbId,
    pub storage_area_id: DbId,
    /// Zero when the pair has never been stocked.
    pub quantity: Decimal,
}

/// POST /api/inventory/movements
///
/// Apply one stock movement as the authenticated user. Returns 201 with the
/// stored record and the ledger rows it changed.
pub async fn create_movement(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<MovementRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MovementOutcome>>)> {
    let outcome = state
        .movement_engine()
        .apply(&input, &user.actor())
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// GET /api/inventory/movements
///
/// List movements newest first with optional filters.
pub async fn list_movements(
    RequireReader(_user): RequireReader,
    State(state): State<AppState>,
    Query(params): Query<MovementQuery>,
) -> AppResult<Json<DataResponse<Vec<StockMovementDetail>>>> {
    let movements = StockMovementRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: movements }))
}

/// GET /api/inventory/levels
///
/// Quantity matrix of live items against live storage areas.
pub async fn list_levels(
    RequireReader(_user): RequireReader,
    State(state): State<AppState>,
    Query(params): Query<LevelQuery>,
) -> AppResult<Json<DataResponse<Vec<LevelMatrixRow>>>> {
    let rows = InventoryRepo::matrix(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/inventory/levels/{item_id}/{storage_area_id}
///
/// Current quantity for one pair. 404 if either side is unknown or deleted.
pub async fn get_level(
    RequireReader(_user): RequireReader,
    State(state): State<AppState>,
    Path((item_id, storage_area_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<CurrentLevel>>> {
    ItemRepo::find_active(&state.pool, item_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        })?;
    StorageAreaRepo::find_active(&state.pool, storage_area_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "StorageArea",
            id: storage_area_id,
        })?;

    let quantity = InventoryRepo::current_quantity(&state.pool, item_id, storage_area_id).await?;
    Ok(Json(DataResponse {
        data: CurrentLevel {
            item_id,
            storage_area_id,
            quantity,
        },
    }))
}
