//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! table row, plus the create DTOs and query filters for that table.

pub mod inventory;
pub mod item;
pub mod setting;
pub mod stock_movement;
pub mod storage_area;
pub mod user;
