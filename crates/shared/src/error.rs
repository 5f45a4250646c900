//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Treasury or account balance is insufficient for the operation.
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    /// Payment exceeds the remaining amount on an agreement or invoice.
    #[error("Remaining amount exceeded: {0}")]
    RemainingAmountExceeded(String),

    /// Duplicate unique name or duplicate payment submission.
    #[error("Duplicate reference: {0}")]
    DuplicateReference(String),

    /// Delete blocked by referential dependents.
    #[error("Has dependent records: {0}")]
    HasDependentRecords(String),

    /// Malformed or cross-type entity reference.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_)
            | Self::InsufficientBalance(_)
            | Self::RemainingAmountExceeded(_)
            | Self::InvalidReference(_) => 400,
            Self::DuplicateReference(_) | Self::HasDependentRecords(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InsufficientBalance(_) => "INSUFFICIENT_BALANCE",
            Self::RemainingAmountExceeded(_) => "REMAINING_AMOUNT_EXCEEDED",
            Self::DuplicateReference(_) => "DUPLICATE_REFERENCE",
            Self::HasDependentRecords(_) => "HAS_DEPENDENT_RECORDS",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
