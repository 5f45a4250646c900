//! The salary recomputation chain.

use rust_decimal::Decimal;

use super::types::SalaryTransaction;

/// Relinks an employee's whole salary chain from the base salary.
///
/// Entries are sorted in place by `(date, created_at, id)` and every
/// `salary_before`/`salary_after` pair is rewritten so the chain invariant
/// holds again. Returns the employee's resulting current salary: the last
/// entry's `salary_after`, or the base salary for an empty chain.
///
/// Running this over the full chain covers every mutation the same way:
/// appending, backdated inserts, edits and deletes all reduce to "sort and
/// relink".
pub fn recompute_chain(entries: &mut [SalaryTransaction], base_salary: Decimal) -> Decimal {
    entries.sort_by_key(|entry| (entry.date, entry.created_at, entry.id.into_inner()));

    let mut running = base_salary;
    for entry in entries.iter_mut() {
        entry.salary_before = running;
        entry.salary_after = running + entry.amount;
        running = entry.salary_after;
    }
    running
}
