//! Expense-related types
//!
//! An expense records who paid, how much, and between whom the cost is shared.

use super::member::MemberId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Expense identifier, unique within a group
pub type ExpenseId = String;

/// A shared expense recorded in a group
///
/// When `split_amounts` is present it is aligned by index with `split_with`
/// and its sum must equal `amount`. When absent the amount is split evenly.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// Expense identifier
    pub id: ExpenseId,

    /// Free-form description
    pub description: String,

    /// Total amount paid (positive)
    pub amount: Decimal,

    /// Member who paid the full amount
    pub paid_by: MemberId,

    /// Members sharing the cost, in order
    ///
    /// A member listed twice is charged twice.
    pub split_with: Vec<MemberId>,

    /// Explicit per-participant shares, aligned with `split_with`
    pub split_amounts: Option<Vec<Decimal>>,

    /// When the expense was recorded
    pub date: Option<DateTime<Utc>>,
}

impl Expense {
    /// Create an evenly split expense
    pub fn even(
        id: impl Into<ExpenseId>,
        description: impl Into<String>,
        amount: Decimal,
        paid_by: impl Into<MemberId>,
        split_with: Vec<MemberId>,
    ) -> Self {
        Expense {
            id: id.into(),
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            split_with,
            split_amounts: None,
            date: None,
        }
    }

    /// Attach explicit per-participant shares
    pub fn with_split_amounts(mut self, split_amounts: Vec<Decimal>) -> Self {
        self.split_amounts = Some(split_amounts);
        self
    }

    /// Attach a timestamp
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Whether `member` pays for or shares this expense
    pub fn involves(&self, member: &str) -> bool {
        self.paid_by == member || self.split_with.iter().any(|m| m == member)
    }
}
