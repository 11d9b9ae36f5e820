//! Ledger records
//!
//! A ledger record is one mutation of one group, as read from the input
//! stream. Records for the same group must be applied in input order.

use super::expense::{Expense, ExpenseId};
use super::member::{GroupId, Member, MemberId};

/// One mutation of a group
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerRecord {
    /// Add a member (creates the group on first use)
    AddMember { group: GroupId, member: Member },

    /// Change a member's display name
    RenameMember {
        group: GroupId,
        member: MemberId,
        name: String,
    },

    /// Remove a member together with every expense it pays for or shares
    RemoveMember { group: GroupId, member: MemberId },

    /// Record a new expense
    AddExpense { group: GroupId, expense: Expense },

    /// Replace an existing expense, keeping its id
    EditExpense { group: GroupId, expense: Expense },

    /// Delete an expense
    DeleteExpense { group: GroupId, expense: ExpenseId },
}

impl LedgerRecord {
    /// The group this record applies to
    pub fn group(&self) -> &GroupId {
        match self {
            LedgerRecord::AddMember { group, .. }
            | LedgerRecord::RenameMember { group, .. }
            | LedgerRecord::RemoveMember { group, .. }
            | LedgerRecord::AddExpense { group, .. }
            | LedgerRecord::EditExpense { group, .. }
            | LedgerRecord::DeleteExpense { group, .. } => group,
        }
    }

    /// Short name of the operation, used in log and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerRecord::AddMember { .. } => "member",
            LedgerRecord::RenameMember { .. } => "rename_member",
            LedgerRecord::RemoveMember { .. } => "remove_member",
            LedgerRecord::AddExpense { .. } => "expense",
            LedgerRecord::EditExpense { .. } => "edit_expense",
            LedgerRecord::DeleteExpense { .. } => "delete_expense",
        }
    }
}
