//! Quantity ledger arithmetic.
//!
//! The database layer reads the current quantity for an (item, area) pair,
//! asks [`next_quantity`] for the value to store, and writes it back. No row
//! for a pair means the quantity is zero.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;
use crate::quantity::{display_quantity, round_quantity, MAX_QUANTITY};
use crate::types::DbId;

/// A ledger row after a movement was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdatedLevel {
    pub item_id: DbId,
    pub storage_area_id: DbId,
    pub quantity: Decimal,
}

/// Compute the quantity to store after applying `delta` to `current`.
///
/// With `allow_negative` unset, a result below zero is rejected with
/// [`CoreError::InsufficientStock`]. A result beyond [`MAX_QUANTITY`] is
/// rejected as out of range. The returned value is rounded to three decimals.
pub fn next_quantity(
    current: Decimal,
    delta: Decimal,
    allow_negative: bool,
) -> Result<Decimal, CoreError> {
    let next = current + delta;
    if !allow_negative && next < Decimal::ZERO {
        return Err(CoreError::InsufficientStock(
            "Insufficient stock for this operation.".into(),
        ));
    }

    let safe = if allow_negative {
        next
    } else {
        next.max(Decimal::ZERO)
    };
    in_range(round_quantity(safe))
}

/// Signed change recorded for an absolute `set`.
///
/// Fails when the change itself does not fit a stored quantity.
pub fn set_delta(current: Decimal, target: Decimal) -> Result<Decimal, CoreError> {
    in_range(round_quantity(target - current))
}

fn in_range(value: Decimal) -> Result<Decimal, CoreError> {
    if value.abs() > MAX_QUANTITY {
        return Err(CoreError::InvalidRequest("Quantity is out of range.".into()));
    }
    Ok(value)
}

/// Note recorded for a `set` when the caller gave none.
pub fn default_set_note(current: Decimal, target: Decimal) -> String {
    format!(
        "Absolute set from {} to {}",
        display_quantity(current),
        display_quantity(target)
    )
}
