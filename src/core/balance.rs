//! Balance calculation
//!
//! Reduces a group's members and expenses into the net balance of every
//! member. The payer of an expense is credited with the full amount and each
//! participant is debited with their share. The reduction is order
//! independent and is recomputed from scratch on every call.
//!
//! Every expense is validated before any arithmetic happens, so a call either
//! returns balances for a consistent snapshot or an error naming the first
//! violated constraint.

use crate::config::EngineConfig;
use crate::types::{Balances, Expense, ExpenseViolation, Member, SettleError};
use rust_decimal::Decimal;
use tracing::debug;

/// Most decimal places a `Decimal` can carry
const MAX_SCALE: u32 = 28;

/// Compute the net balance of every member
///
/// Members without any expense appear with a zero balance. When the
/// expenses are valid the balances always sum to exactly zero.
///
/// # Errors
///
/// Returns an error if:
/// - An expense violates a precondition (see [`validate_expense`])
/// - Accumulating a balance would overflow
pub fn compute_balances(
    members: &[Member],
    expenses: &[Expense],
    config: &EngineConfig,
) -> Result<Balances, SettleError> {
    let mut balances: Balances = members
        .iter()
        .map(|member| (member.id.clone(), Decimal::ZERO))
        .collect();

    for expense in expenses {
        validate_expense(expense, |id| balances.contains_key(id))?;

        apply(&mut balances, &expense.paid_by, expense.amount)?;
        for (participant, share) in expense.split_with.iter().zip(shares(expense, config)?) {
            apply(&mut balances, participant, -share)?;
        }
    }

    debug!(
        members = members.len(),
        expenses = expenses.len(),
        "Computed balances"
    );
    Ok(balances)
}

/// Check the preconditions of the balance calculator for one expense
///
/// `is_member` answers whether an id belongs to the group.
///
/// # Errors
///
/// Returns [`SettleError::InvalidExpense`] with the first violated constraint.
pub fn validate_expense<F>(expense: &Expense, is_member: F) -> Result<(), SettleError>
where
    F: Fn(&str) -> bool,
{
    let invalid = |violation| Err(SettleError::invalid_expense(&expense.id, violation));

    if expense.amount <= Decimal::ZERO {
        return invalid(ExpenseViolation::NonPositiveAmount {
            amount: expense.amount,
        });
    }
    if expense.split_with.is_empty() {
        return invalid(ExpenseViolation::NoParticipants);
    }
    if !is_member(&expense.paid_by) {
        return invalid(ExpenseViolation::UnknownPayer {
            member: expense.paid_by.clone(),
        });
    }
    if let Some(unknown) = expense.split_with.iter().find(|id| !is_member(id)) {
        return invalid(ExpenseViolation::UnknownParticipant {
            member: unknown.clone(),
        });
    }

    if let Some(amounts) = &expense.split_amounts {
        if amounts.len() != expense.split_with.len() {
            return invalid(ExpenseViolation::SplitCountMismatch {
                amounts: amounts.len(),
                participants: expense.split_with.len(),
            });
        }
        if let Some(negative) = amounts.iter().find(|amount| **amount < Decimal::ZERO) {
            return invalid(ExpenseViolation::NegativeSplit { amount: *negative });
        }

        let sum = amounts
            .iter()
            .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
            .ok_or_else(|| SettleError::arithmetic_overflow("split sum"))?;
        if sum != expense.amount {
            return invalid(ExpenseViolation::SplitSumMismatch {
                sum,
                amount: expense.amount,
            });
        }
    }

    Ok(())
}

/// Per-participant shares of an expense, aligned with `split_with`
///
/// Explicit split amounts are used as given. Otherwise the amount is split
/// evenly with [`split_evenly`].
///
/// # Errors
///
/// Returns an error if an even share cannot be represented.
pub fn shares(expense: &Expense, config: &EngineConfig) -> Result<Vec<Decimal>, SettleError> {
    match &expense.split_amounts {
        Some(amounts) => Ok(amounts.clone()),
        None => split_evenly(
            expense.amount,
            expense.split_with.len(),
            config.currency_scale,
        ),
    }
}

/// Split `amount` evenly between `participants` in whole minor units
///
/// Every participant gets `amount / participants` truncated to the minor
/// unit. The leftover units go one each to the first participants, so the
/// shares always add up to exactly `amount`. The minor unit is
/// `10^-currency_scale`, or finer when `amount` itself has more decimals.
///
/// The allocation is done on the integer mantissa, so no rounding happens
/// even at the edge of `Decimal` precision.
///
/// # Errors
///
/// Returns [`SettleError::ArithmeticOverflow`] if `amount` expressed in minor
/// units, or one of the shares, does not fit in a `Decimal`.
pub fn split_evenly(
    amount: Decimal,
    participants: usize,
    currency_scale: u32,
) -> Result<Vec<Decimal>, SettleError> {
    if participants == 0 {
        return Ok(Vec::new());
    }
    let overflow = || SettleError::arithmetic_overflow("even split");

    let amount = amount.normalize();
    let scale = currency_scale.min(MAX_SCALE).max(amount.scale());
    let units = 10i128
        .checked_pow(scale - amount.scale())
        .and_then(|factor| amount.mantissa().checked_mul(factor))
        .ok_or_else(overflow)?;
    let count = i128::try_from(participants).map_err(|_| overflow())?;

    let share = units / count;
    let leftover = (units % count).unsigned_abs();
    let unit = units.signum();

    (0..participants)
        .map(|idx| {
            let extra = if (idx as u128) < leftover { unit } else { 0 };
            Decimal::try_from_i128_with_scale(share + extra, scale).map_err(|_| overflow())
        })
        .collect()
}

fn apply(balances: &mut Balances, member: &str, delta: Decimal) -> Result<(), SettleError> {
    // Validation guarantees the member exists.
    if let Some(balance) = balances.get_mut(member) {
        *balance = balance
            .checked_add(delta)
            .ok_or_else(|| SettleError::arithmetic_overflow("balance"))?;
    }
    Ok(())
}
