//! Request-scoped orchestration that spans several repositories.
//!
//! - [`movement::MovementEngine`] -- applies one stock movement atomically.
//! - [`movement::MovementPolicy`] -- setting-driven rules read per movement.

pub mod movement;

pub use movement::{Actor, MovementEngine, MovementError, MovementOutcome, MovementPolicy};
