//! Quantity parsing and the 3-decimal rounding discipline.
//!
//! Every quantity written to the ledger or the movement log passes through
//! [`round_quantity`]. Quantities are exact decimals, so the ledger never
//! accumulates binary floating-point noise.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::error::CoreError;

/// Number of fractional digits kept for every stored quantity.
pub const QUANTITY_SCALE: u32 = 3;

/// Largest magnitude that fits `NUMERIC(18,3)`.
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(2_808_348_671, 232_830_643, 0, false, 3);

/// Smallest magnitude accepted for a signed `adjust` quantity.
pub const ADJUST_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Round to [`QUANTITY_SCALE`] places, midpoints away from zero.
pub fn round_quantity(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a JSON quantity field.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace and
/// exponent notation allowed). The value is returned unrounded.
pub fn parse_quantity(value: Option<&Value>) -> Result<Decimal, CoreError> {
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    };

    let quantity =
        parsed.ok_or_else(|| CoreError::InvalidRequest("Quantity must be numeric.".into()))?;

    if quantity.abs() > MAX_QUANTITY {
        return Err(CoreError::InvalidRequest("Quantity is out of range.".into()));
    }
    Ok(quantity)
}

/// Parse and require a strictly positive quantity after rounding.
pub fn positive_quantity(value: Option<&Value>) -> Result<Decimal, CoreError> {
    let quantity = round_quantity(parse_quantity(value)?);
    if quantity <= Decimal::ZERO {
        return Err(CoreError::InvalidRequest(
            "Quantity must be greater than 0.".into(),
        ));
    }
    Ok(quantity)
}

/// Parse a signed quantity that must not be zero.
///
/// The zero check runs on the unrounded value against [`ADJUST_EPSILON`].
pub fn non_zero_quantity(value: Option<&Value>) -> Result<Decimal, CoreError> {
    let quantity = parse_quantity(value)?;
    if quantity.abs() < ADJUST_EPSILON {
        return Err(CoreError::InvalidRequest(
            "Quantity cannot be 0 for adjust.".into(),
        ));
    }
    Ok(round_quantity(quantity))
}

/// Parse an absolute target quantity, which must be zero or greater.
pub fn target_quantity(value: Option<&Value>) -> Result<Decimal, CoreError> {
    let target = round_quantity(parse_quantity(value).map_err(|_| {
        CoreError::InvalidRequest("target_quantity must be 0 or greater.".into())
    })?);
    if target < Decimal::ZERO {
        return Err(CoreError::InvalidRequest(
            "target_quantity must be 0 or greater.".into(),
        ));
    }
    Ok(target)
}

/// Render a quantity without trailing zeros (`9.000` becomes `9`).
pub fn display_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    Decimal::from_str(raw)
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}
