//! Domain logic for the stockroom inventory service.
//!
//! This crate has no I/O. It owns the error taxonomy, quantity parsing and
//! rounding, movement-request validation, and the ledger arithmetic that the
//! movement engine applies inside a database transaction.

pub mod error;
pub mod ledger;
pub mod movement;
pub mod quantity;
pub mod roles;
pub mod settings;
pub mod types;
