//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `TreasuryId` where a
//! `ProjectId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(ClientId, "Unique identifier for a client.");
typed_id!(TreasuryId, "Unique identifier for a treasury.");
typed_id!(ProjectId, "Unique identifier for a project.");
typed_id!(TransactionId, "Unique identifier for a ledger transaction.");
typed_id!(ContractorId, "Unique identifier for a contractor.");
typed_id!(AgreementId, "Unique identifier for a contract agreement.");
typed_id!(PaymentId, "Unique identifier for a contract payment.");
typed_id!(CategoryId, "Unique identifier for an expense category.");
typed_id!(SaleId, "Unique identifier for a sales invoice.");
typed_id!(SaleReturnId, "Unique identifier for a sale return.");
typed_id!(ProductId, "Unique identifier for a product.");
typed_id!(WarehouseId, "Unique identifier for a warehouse.");
typed_id!(StockOperationId, "Unique identifier for a stock operation.");
typed_id!(EmployeeId, "Unique identifier for an employee.");
typed_id!(
    SalaryTransactionId,
    "Unique identifier for a payroll transaction."
);
