use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed or logically inconsistent input.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An item or storage area id that does not resolve to a live record.
    #[error("Invalid reference for {field}: {message}")]
    InvalidReference {
        field: &'static str,
        message: String,
    },

    /// A movement would drive a ledger quantity below zero.
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Writes are blocked by the read-only mode setting.
    #[error("Read-only: {0}")]
    ReadOnly(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    /// Build an [`CoreError::InvalidReference`] with the standard message.
    pub fn invalid_reference(field: &'static str) -> Self {
        CoreError::InvalidReference {
            field,
            message: format!("Valid {field} is required."),
        }
    }
}
