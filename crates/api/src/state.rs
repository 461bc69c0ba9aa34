use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::MovementEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and config are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stockroom_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: stockroom_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// A movement engine over this state's pool.
    pub fn movement_engine(&self) -> MovementEngine {
        MovementEngine::new(self.pool.clone())
    }
}
