//! Project aggregates.
//!
//! A project carries four derived totals, all maintained exclusively through
//! [`crate::mutation::DeltaSet`] application.

use chrono::{DateTime, Utc};
use mizan_shared::types::{ClientId, ProjectId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A construction project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier.
    pub id: ProjectId,
    /// Unique display name.
    pub name: String,
    /// Supervising engineer, if assigned.
    pub engineer: Option<UserId>,
    /// Client the project is billed to.
    pub client: Option<ClientId>,
    /// Derived: sum of deposits recorded against the project.
    pub total_revenue: Decimal,
    /// Derived: sum of withdrawals recorded against the project.
    pub total_expenses: Decimal,
    /// Derived: sum of agreed amounts across the project's contracts.
    pub total_agreed_contractor_amount: Decimal,
    /// Derived: sum of contractor payments made for the project.
    pub total_paid_contractor_amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a project with zeroed derived totals.
    #[must_use]
    pub fn new(
        name: String,
        engineer: Option<UserId>,
        client: Option<ClientId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            engineer,
            client,
            total_revenue: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            total_agreed_contractor_amount: Decimal::ZERO,
            total_paid_contractor_amount: Decimal::ZERO,
            created_at: now,
        }
    }

    /// Agreed contractor money not yet paid out.
    #[must_use]
    pub fn remaining_contractor_amount(&self) -> Decimal {
        self.total_agreed_contractor_amount - self.total_paid_contractor_amount
    }
}

#[cfg(test)]
mod project_tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_project_has_zero_totals() {
        let project = Project::new("Villa 12".into(), None, None, Utc::now());
        assert_eq!(project.total_revenue, Decimal::ZERO);
        assert_eq!(project.remaining_contractor_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_remaining_contractor_amount() {
        let mut project = Project::new("Villa 12".into(), None, None, Utc::now());
        project.total_agreed_contractor_amount = dec!(50000);
        project.total_paid_contractor_amount = dec!(12500);
        assert_eq!(project.remaining_contractor_amount(), dec!(37500));
    }
}
