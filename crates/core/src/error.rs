//! Domain error type shared by all core modules.

use mizan_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by domain planning functions.
///
/// Planning functions validate and resolve everything *before* any balance
/// delta is applied, so a `DomainError` always means nothing was mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A referenced aggregate does not exist.
    #[error("{entity} not found")]
    NotFound {
        /// Human-readable entity name ("treasury", "sale", ...).
        entity: &'static str,
    },

    /// A debit would drive a treasury balance negative.
    #[error("insufficient balance in treasury {treasury}: available {available}, required {required}")]
    InsufficientBalance {
        /// Name of the treasury that lacks funds.
        treasury: String,
        /// Current balance of the treasury.
        available: Decimal,
        /// Amount the operation tried to debit.
        required: Decimal,
    },

    /// A payment exceeds the remaining amount of its agreement or invoice.
    #[error("amount {requested} exceeds remaining amount {remaining}")]
    RemainingAmountExceeded {
        /// What is still owed.
        remaining: Decimal,
        /// What the caller tried to pay.
        requested: Decimal,
    },

    /// An identical financial record already exists.
    #[error("duplicate record: {0}")]
    DuplicateReference(String),

    /// The record cannot be removed while dependent records reference it.
    #[error("{0}")]
    HasDependentRecords(String),

    /// A cross-aggregate reference is structurally invalid.
    #[error("{0}")]
    InvalidReference(String),

    /// Input failed a shape or range check.
    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::RemainingAmountExceeded { .. } => "REMAINING_AMOUNT_EXCEEDED",
            Self::DuplicateReference(_) => "DUPLICATE_REFERENCE",
            Self::HasDependentRecords(_) => "HAS_DEPENDENT_RECORDS",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::NotFound { .. } => Self::NotFound(message),
            DomainError::InsufficientBalance { .. } => Self::InsufficientBalance(message),
            DomainError::RemainingAmountExceeded { .. } => {
                Self::RemainingAmountExceeded(message)
            }
            DomainError::DuplicateReference(_) => Self::DuplicateReference(message),
            DomainError::HasDependentRecords(_) => Self::HasDependentRecords(message),
            DomainError::InvalidReference(_) => Self::InvalidReference(message),
            DomainError::Validation(_) => Self::Validation(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            DomainError::NotFound { entity: "treasury" }.error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            DomainError::InsufficientBalance {
                treasury: "Main Safe".into(),
                available: dec!(10),
                required: dec!(25),
            }
            .error_code(),
            "INSUFFICIENT_BALANCE"
        );
        assert_eq!(
            DomainError::RemainingAmountExceeded {
                remaining: dec!(5),
                requested: dec!(9),
            }
            .error_code(),
            "REMAINING_AMOUNT_EXCEEDED"
        );
    }

    #[test]
    fn test_insufficient_balance_message_names_treasury() {
        let err = DomainError::InsufficientBalance {
            treasury: "Site Custody".into(),
            available: dec!(100),
            required: dec!(150),
        };
        let msg = err.to_string();
        assert!(msg.contains("Site Custody"));
        assert!(msg.contains("100"));
        assert!(msg.contains("150"));
    }

    #[test]
    fn test_maps_to_app_error_kinds() {
        let app: AppError = DomainError::Validation("amount must be positive".into()).into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");

        let app: AppError = DomainError::HasDependentRecords(
            "treasury has transactions".into(),
        )
        .into();
        assert_eq!(app.error_code(), "HAS_DEPENDENT_RECORDS");
    }
}
