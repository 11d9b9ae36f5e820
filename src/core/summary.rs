//! Group summaries and reports
//!
//! A summary presents the balances of a group member by member, split into
//! what each member owes and what each member is owed, together with the
//! group's expense totals. A report bundles the summary with the settlement
//! plan. Both are computed from a group snapshot and never stored.

use crate::config::EngineConfig;
use crate::core::group::Group;
use crate::core::settlement::resolve_settlements;
use crate::types::{Balances, GroupId, MemberId, SettleError, Settlement};
use rust_decimal::Decimal;

/// Balance of one member, with display name
#[derive(Debug, Clone, PartialEq)]
pub struct MemberBalance {
    pub member: MemberId,
    pub name: String,
    pub balance: Decimal,
}

impl MemberBalance {
    /// Amount this member still has to pay (zero for creditors)
    pub fn owes(&self) -> Decimal {
        (-self.balance).max(Decimal::ZERO)
    }

    /// Amount this member still has to receive (zero for debtors)
    pub fn owed(&self) -> Decimal {
        self.balance.max(Decimal::ZERO)
    }
}

/// Totals and per-member balances of a group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub group: GroupId,
    /// Sum of all expense amounts
    pub total_expenses: Decimal,
    pub expense_count: usize,
    /// One entry per member, in the group's member order
    pub members: Vec<MemberBalance>,
}

impl GroupSummary {
    /// Summarize a group
    ///
    /// # Errors
    ///
    /// Returns an error if the balances cannot be computed.
    pub fn compute(group: &Group, config: &EngineConfig) -> Result<Self, SettleError> {
        let balances = group.balances(config)?;

        let total_expenses = group
            .expenses()
            .iter()
            .try_fold(Decimal::ZERO, |acc, expense| acc.checked_add(expense.amount))
            .ok_or_else(|| SettleError::arithmetic_overflow("expense total"))?;

        let members = group
            .members()
            .iter()
            .map(|member| MemberBalance {
                member: member.id.clone(),
                name: member.name.clone(),
                balance: balances.get(&member.id).copied().unwrap_or_default(),
            })
            .collect();

        Ok(GroupSummary {
            group: group.id().clone(),
            total_expenses,
            expense_count: group.expenses().len(),
            members,
        })
    }

    /// Number of members in the group, including settled ones
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Everything reported for one group: its summary and settlement plan
#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub summary: GroupSummary,
    pub settlements: Vec<Settlement>,
}

impl GroupReport {
    /// Compute the report for a group snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the balances cannot be computed.
    pub fn compute(group: &Group, config: &EngineConfig) -> Result<Self, SettleError> {
        let summary = GroupSummary::compute(group, config)?;
        let balances: Balances = summary
            .members
            .iter()
            .map(|entry| (entry.member.clone(), entry.balance))
            .collect();

        Ok(GroupReport {
            settlements: resolve_settlements(&balances),
            summary,
        })
    }

    /// The group this report describes
    pub fn group(&self) -> &GroupId {
        &self.summary.group
    }
}
