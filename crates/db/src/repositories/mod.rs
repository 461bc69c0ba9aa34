//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Reads that
//! may run inside or outside a transaction are generic over
//! [`sqlx::PgExecutor`]; multi-statement operations take `&mut PgConnection`
//! so callers can pass `&mut *tx`.

pub mod inventory_repo;
pub mod item_repo;
pub mod settings_repo;
pub mod stock_movement_repo;
pub mod storage_area_repo;
pub mod user_repo;

pub use inventory_repo::{InventoryRepo, LedgerError};
pub use item_repo::ItemRepo;
pub use settings_repo::SettingsRepo;
pub use stock_movement_repo::StockMovementRepo;
pub use storage_area_repo::StorageAreaRepo;
pub use user_repo::UserRepo;
