//! Group activity log entries
//!
//! Every successful mutation of a group appends one entry. The log is
//! append-only and ordered like the ledger records that produced it.

use super::expense::ExpenseId;
use super::member::MemberId;
use rust_decimal::Decimal;

/// One recorded change to a group
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    MemberAdded {
        member: MemberId,
        name: String,
    },

    /// A member left; `purged` lists the expenses removed with it
    MemberRemoved {
        member: MemberId,
        name: String,
        purged: Vec<ExpenseId>,
    },

    MemberRenamed {
        member: MemberId,
        old_name: String,
        new_name: String,
    },

    ExpenseAdded {
        expense: ExpenseId,
        description: String,
        amount: Decimal,
        paid_by: MemberId,
    },

    /// Carries the values after the edit
    ExpenseEdited {
        expense: ExpenseId,
        description: String,
        amount: Decimal,
        paid_by: MemberId,
    },

    ExpenseDeleted {
        expense: ExpenseId,
        description: String,
    },
}

impl Activity {
    /// Event name, as used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Activity::MemberAdded { .. } => "member_added",
            Activity::MemberRemoved { .. } => "member_removed",
            Activity::MemberRenamed { .. } => "member_renamed",
            Activity::ExpenseAdded { .. } => "expense_added",
            Activity::ExpenseEdited { .. } => "expense_edited",
            Activity::ExpenseDeleted { .. } => "expense_deleted",
        }
    }
}
