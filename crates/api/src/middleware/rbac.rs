//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role is not
//! in the allowed set.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stockroom_core::error::CoreError;
use stockroom_core::roles::{role_in, READ_ROLES, WRITE_ROLES};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role allowed to read inventory. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn list(RequireReader(_user): RequireReader) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireReader(pub AuthUser);

impl FromRequestParts<AppState> for RequireReader {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !role_in(&user.role, READ_ROLES) {
            return Err(AppError::Core(CoreError::Forbidden(
                "You do not have access to inventory".into(),
            )));
        }
        Ok(RequireReader(user))
    }
}

/// Requires `owner` or `manager`. Rejects with 403 otherwise.
pub struct RequireWriter(pub AuthUser);

impl FromRequestParts<AppState> for RequireWriter {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !role_in(&user.role, WRITE_ROLES) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Owner or Manager role required".into(),
            )));
        }
        Ok(RequireWriter(user))
    }
}
