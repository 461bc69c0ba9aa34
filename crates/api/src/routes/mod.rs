pub mod health;
pub mod inventory;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree, mounted at `/api` and `/api/v1`.
///
/// ```text
/// /inventory/movements                              apply (POST), list (GET)
/// /inventory/levels                                 quantity matrix (GET)
/// /inventory/levels/{item_id}/{storage_area_id}     single level (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/inventory", inventory::router())
}
