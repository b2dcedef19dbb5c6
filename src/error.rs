use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failure taxonomy for the platform core.
///
/// `Conflict`, `InvalidTransition`, `InsufficientFunds` and `AlreadySettled`
/// are business-rule rejections: they are surfaced verbatim to the caller and
/// never retried automatically. `StoreUnavailable` on a write means the
/// outcome of the operation is unknown and must never be treated as success.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
    #[error("stored state no longer matches the state last read")]
    Conflict,
    #[error("insufficient funds: requested {requested}, wallet holds {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("withdrawal request is already settled")]
    AlreadySettled,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
