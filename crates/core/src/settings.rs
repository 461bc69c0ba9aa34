//! Setting keys consulted by the movement engine and their value parsing.
//!
//! Settings are stored as text in the `app_settings` key/value table.

/// When true, movements may drive a ledger quantity below zero.
pub const ALLOW_NEGATIVE_STOCK: &str = "allow_negative_stock";

/// When true, only owners may apply movements.
pub const READ_ONLY_MODE: &str = "read_only_mode";

/// Interpret a stored setting value as a boolean.
///
/// `1`, `true`, `yes` and `on` (any case, surrounding whitespace ignored)
/// are true; anything else, including a missing value, is false.
pub fn parse_bool(value: Option<&str>) -> bool {
    match value {
        Some(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => false,
    }
}
