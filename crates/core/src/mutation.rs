//! The balance mutation primitive.
//!
//! Every financial event in Mizan (transaction, contract payment, sale,
//! salary disbursement) boils down to a set of signed deltas against derived
//! aggregate fields. Planning functions build a [`DeltaSet`]; the store
//! applies it in one commit, or applies [`DeltaSet::inverted`] to reverse a
//! deleted event exactly.

use mizan_shared::types::{AgreementId, ContractorId, ProjectId, TreasuryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A derived aggregate field that a financial event mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeltaTarget {
    /// `Treasury.current_balance`.
    TreasuryBalance(TreasuryId),
    /// `Project.total_revenue`.
    ProjectRevenue(ProjectId),
    /// `Project.total_expenses`.
    ProjectExpenses(ProjectId),
    /// `Project.total_agreed_contractor_amount`.
    ProjectAgreed(ProjectId),
    /// `Project.total_paid_contractor_amount`.
    ProjectPaid(ProjectId),
    /// `Contractor.balance` (what the company still owes the contractor).
    ContractorBalance(ContractorId),
    /// `ContractAgreement.paid_amount`.
    AgreementPaid(AgreementId),
}

/// One signed adjustment to a derived aggregate field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceDelta {
    /// The field being adjusted.
    pub target: DeltaTarget,
    /// Signed amount: positive credits the field, negative debits it.
    pub amount: Decimal,
}

/// The full set of balance deltas produced by one financial event.
///
/// Order is preserved but carries no semantic weight; deltas against the
/// same target are additive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaSet {
    deltas: Vec<BalanceDelta>,
}

impl DeltaSet {
    /// Creates an empty delta set.
    #[must_use]
    pub const fn new() -> Self {
        Self { deltas: Vec::new() }
    }

    /// Adds `amount` to `target`.
    pub fn credit(&mut self, target: DeltaTarget, amount: Decimal) {
        self.deltas.push(BalanceDelta { target, amount });
    }

    /// Subtracts `amount` from `target`.
    pub fn debit(&mut self, target: DeltaTarget, amount: Decimal) {
        self.deltas.push(BalanceDelta {
            target,
            amount: -amount,
        });
    }

    /// Returns the exact reversal of this delta set.
    ///
    /// Applying a set and then its inversion leaves every aggregate where it
    /// started.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            deltas: self
                .deltas
                .iter()
                .map(|d| BalanceDelta {
                    target: d.target,
                    amount: -d.amount,
                })
                .collect(),
        }
    }

    /// Iterates over the deltas in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BalanceDelta> {
        self.deltas.iter()
    }

    /// Net amount this set applies to `target`.
    #[must_use]
    pub fn net_for(&self, target: DeltaTarget) -> Decimal {
        self.deltas
            .iter()
            .filter(|d| d.target == target)
            .map(|d| d.amount)
            .sum()
    }

    /// True if the set contains no deltas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Number of deltas in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Appends all deltas from `other`.
    pub fn extend(&mut self, other: Self) {
        self.deltas.extend(other.deltas);
    }
}

impl<'a> IntoIterator for &'a DeltaSet {
    type Item = &'a BalanceDelta;
    type IntoIter = std::slice::Iter<'a, BalanceDelta>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.iter()
    }
}

#[cfg(test)]
mod mutation_tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_credit_and_debit_signs() {
        let treasury = TreasuryId::new();
        let mut set = DeltaSet::new();
        set.credit(DeltaTarget::TreasuryBalance(treasury), dec!(100));
        set.debit(DeltaTarget::TreasuryBalance(treasury), dec!(30));

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.net_for(DeltaTarget::TreasuryBalance(treasury)),
            dec!(70)
        );
    }

    #[test]
    fn test_net_for_ignores_other_targets() {
        let project = ProjectId::new();
        let mut set = DeltaSet::new();
        set.credit(DeltaTarget::ProjectRevenue(project), dec!(500));
        set.credit(DeltaTarget::ProjectExpenses(project), dec!(80));

        assert_eq!(set.net_for(DeltaTarget::ProjectRevenue(project)), dec!(500));
        assert_eq!(
            set.net_for(DeltaTarget::ProjectPaid(project)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_inverted_negates_every_delta() {
        let treasury = TreasuryId::new();
        let contractor = ContractorId::new();
        let mut set = DeltaSet::new();
        set.debit(DeltaTarget::TreasuryBalance(treasury), dec!(250));
        set.credit(DeltaTarget::ContractorBalance(contractor), dec!(250));

        let inverse = set.inverted();
        assert_eq!(
            inverse.net_for(DeltaTarget::TreasuryBalance(treasury)),
            dec!(250)
        );
        assert_eq!(
            inverse.net_for(DeltaTarget::ContractorBalance(contractor)),
            dec!(-250)
        );
    }

    #[test]
    fn test_extend_concatenates() {
        let treasury = TreasuryId::new();
        let mut a = DeltaSet::new();
        a.credit(DeltaTarget::TreasuryBalance(treasury), dec!(10));
        let mut b = DeltaSet::new();
        b.credit(DeltaTarget::TreasuryBalance(treasury), dec!(5));

        a.extend(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.net_for(DeltaTarget::TreasuryBalance(treasury)), dec!(15));
    }
}

#[cfg(test)]
mod mutation_props {
    use super::*;
    use proptest::prelude::*;

    fn arb_amount() -> impl Strategy<Value = Decimal> {
        (-1_000_000_00i64..1_000_000_00i64).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #[test]
        fn prop_apply_then_invert_is_identity(amounts in prop::collection::vec(arb_amount(), 0..16)) {
            let treasury = TreasuryId::new();
            let target = DeltaTarget::TreasuryBalance(treasury);

            let mut set = DeltaSet::new();
            for amount in amounts {
                set.credit(target, amount);
            }

            let mut combined = set.clone();
            combined.extend(set.inverted());
            prop_assert_eq!(combined.net_for(target), Decimal::ZERO);
        }

        #[test]
        fn prop_double_inversion_round_trips(amounts in prop::collection::vec(arb_amount(), 0..16)) {
            let project = ProjectId::new();
            let mut set = DeltaSet::new();
            for amount in amounts {
                set.credit(DeltaTarget::ProjectRevenue(project), amount);
            }

            prop_assert_eq!(set.inverted().inverted(), set);
        }
    }
}
