//! Settlement resolution
//!
//! Turns net balances into a list of payments that settles the group, using
//! the greedy largest-first matching of debtors against creditors.
//!
//! The greedy matching emits at most `n - 1` payments for `n` members with a
//! non-zero balance, but it is not guaranteed to find the smallest possible
//! number of payments (that problem is NP-hard in general).

use crate::types::{Balances, MemberId, Settlement};
use rust_decimal::Decimal;
use tracing::debug;

/// Outstanding amount of one debtor or creditor during matching
#[derive(Debug)]
struct Position<'a> {
    member: &'a MemberId,
    outstanding: Decimal,
}

/// Resolve balances into settlement payments
///
/// Debtors (negative balance) and creditors (positive balance) are each
/// sorted by outstanding amount, largest first. Equal amounts keep the
/// member order of `balances`. The largest remaining debtor then
/// pays the largest remaining creditor the smaller of the two outstanding
/// amounts until either side runs out. Members with a zero balance take no
/// part.
///
/// For balances that sum to zero, applying every returned payment brings all
/// balances to exactly zero. The output is fully determined by the input.
pub fn resolve_settlements(balances: &Balances) -> Vec<Settlement> {
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();

    for (member, balance) in balances {
        if *balance < Decimal::ZERO {
            debtors.push(Position {
                member,
                outstanding: balance.abs(),
            });
        } else if *balance > Decimal::ZERO {
            creditors.push(Position {
                member,
                outstanding: *balance,
            });
        }
    }

    // Stable sorts: ties stay in member order.
    debtors.sort_by(|a, b| b.outstanding.cmp(&a.outstanding));
    creditors.sort_by(|a, b| b.outstanding.cmp(&a.outstanding));

    let mut settlements = Vec::new();
    let mut debtor_index = 0;
    let mut creditor_index = 0;

    while debtor_index < debtors.len() && creditor_index < creditors.len() {
        let debtor = &mut debtors[debtor_index];
        let creditor = &mut creditors[creditor_index];

        let amount = debtor.outstanding.min(creditor.outstanding);
        settlements.push(Settlement::new(
            debtor.member.clone(),
            creditor.member.clone(),
            amount,
        ));

        debtor.outstanding -= amount;
        creditor.outstanding -= amount;

        if debtor.outstanding.is_zero() {
            debtor_index += 1;
        }
        if creditor.outstanding.is_zero() {
            creditor_index += 1;
        }
    }

    debug!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        settlements = settlements.len(),
        "Resolved settlements"
    );
    settlements
}
