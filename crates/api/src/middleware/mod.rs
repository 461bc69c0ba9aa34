//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireReader`] -- Any of `owner`, `manager`, `viewer`.
//! - [`rbac::RequireWriter`] -- `owner` or `manager`.

pub mod auth;
pub mod rbac;
