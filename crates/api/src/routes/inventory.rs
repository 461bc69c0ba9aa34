//! Route definitions for the `/inventory` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::inventory;
use crate::state::AppState;

/// Routes mounted at `/inventory`.
///
/// ```text
/// GET    /movements                                -> list_movements
/// POST   /movements                                -> create_movement
/// GET    /levels                                   -> list_levels
/// GET    /levels/{item_id}/{storage_area_id}       -> get_level
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/movements",
            get(inventory::list_movements).post(inventory::create_movement),
        )
        .route("/levels", get(inventory::list_levels))
        .route(
            "/levels/{item_id}/{storage_area_id}",
            get(inventory::get_level),
        )
}
