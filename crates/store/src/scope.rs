//! Role-based read scoping.

use mizan_core::project::Project;
use mizan_core::treasury::Treasury;
use mizan_shared::auth::Role;
use mizan_shared::types::UserId;

/// Who is asking, used to filter reads.
///
/// Managers and accounting managers see everything. Engineers only see the
/// projects they supervise and the custody treasuries they hold, and the
/// records attached to those.
#[derive(Debug, Clone, Copy)]
pub struct Scope {
    /// The requesting user.
    pub user: UserId,
    /// Their role.
    pub role: Role,
}

impl Scope {
    /// Builds a scope for a user.
    #[must_use]
    pub const fn new(user: UserId, role: Role) -> Self {
        Self { user, role }
    }

    /// True for roles that see every record.
    #[must_use]
    pub const fn sees_everything(&self) -> bool {
        matches!(self.role, Role::Manager | Role::AccountingManager)
    }

    /// Whether this user may see a project's records.
    #[must_use]
    pub fn can_view_project(&self, project: &Project) -> bool {
        self.sees_everything() || project.engineer == Some(self.user)
    }

    /// Whether this user may see a treasury and its transactions.
    #[must_use]
    pub fn can_view_treasury(&self, treasury: &Treasury) -> bool {
        self.sees_everything() || treasury.responsible_user == Some(self.user)
    }
}

#[cfg(test)]
mod scope_tests {
    use super::*;
    use chrono::Utc;
    use mizan_core::treasury::{CreateTreasuryInput, TreasuryKind};
    use mizan_shared::types::ProjectId;
    use rust_decimal::Decimal;

    #[test]
    fn test_managers_see_everything() {
        let scope = Scope::new(UserId::new(), Role::Manager);
        assert!(scope.sees_everything());
        let scope = Scope::new(UserId::new(), Role::AccountingManager);
        assert!(scope.sees_everything());
    }

    #[test]
    fn test_engineer_sees_only_their_project_and_custody() {
        let engineer = UserId::new();
        let scope = Scope::new(engineer, Role::Engineer);

        let mut project = Project::new("Villa 12".into(), Some(engineer), None, Utc::now());
        assert!(scope.can_view_project(&project));
        project.engineer = Some(UserId::new());
        assert!(!scope.can_view_project(&project));

        let custody = Treasury::create(
            CreateTreasuryInput {
                name: "Site Custody".into(),
                initial_balance: Decimal::ZERO,
                kind: TreasuryKind::Custody,
                description: None,
                responsible_user: Some(engineer),
                project: Some(ProjectId::new()),
            },
            Utc::now(),
        )
        .unwrap();
        assert!(scope.can_view_treasury(&custody));

        let other = Scope::new(UserId::new(), Role::Engineer);
        assert!(!other.can_view_treasury(&custody));
    }
}
