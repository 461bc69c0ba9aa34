//! Well-known role name constants.
//!
//! These must match the `role` values stored in the `users` table.

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_VIEWER: &str = "viewer";

/// Roles allowed to read inventory data.
pub const READ_ROLES: &[&str] = &[ROLE_OWNER, ROLE_MANAGER, ROLE_VIEWER];

/// Roles allowed to apply stock movements.
pub const WRITE_ROLES: &[&str] = &[ROLE_OWNER, ROLE_MANAGER];

/// Returns `true` if `role` (case-insensitive) is in `allowed`.
pub fn role_in(role: &str, allowed: &[&str]) -> bool {
    let role = role.trim().to_ascii_lowercase();
    allowed.iter().any(|r| *r == role)
}
