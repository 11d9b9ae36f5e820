//! Ledger processing engine
//!
//! This module provides the LedgerEngine that applies ledger records to a
//! book of groups and derives a report for every group on demand.
//!
//! The engine enforces the ledger rules:
//! - A group comes into existence with its first `member` record
//! - Every other record must reference an existing group
//! - Records for one group are applied strictly in input order
//! - A rejected record leaves its group unchanged

use crate::config::EngineConfig;
use crate::core::group::Group;
use crate::core::summary::GroupReport;
use crate::types::{GroupId, LedgerRecord, SettleError};
use std::collections::BTreeMap;

/// Ledger processing engine
///
/// Owns every group seen so far, keyed by group id in ascending order.
#[derive(Debug, Default)]
pub struct LedgerEngine {
    groups: BTreeMap<GroupId, Group>,
}

impl LedgerEngine {
    /// Create a new LedgerEngine with no groups
    pub fn new() -> Self {
        LedgerEngine {
            groups: BTreeMap::new(),
        }
    }

    /// Apply a single ledger record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record references a group that does not exist yet
    /// - The group rejects the operation (unknown or duplicate ids, invalid expense)
    pub fn process(&mut self, record: LedgerRecord) -> Result<(), SettleError> {
        let group = match &record {
            LedgerRecord::AddMember { group, .. } => self
                .groups
                .entry(group.clone())
                .or_insert_with(|| Group::new(group.clone())),
            other => self
                .groups
                .get_mut(other.group())
                .ok_or_else(|| SettleError::unknown_group(other.group()))?,
        };

        apply_record(group, record)
    }

    /// Look up a group by id
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.get(id)
    }

    /// All groups, sorted by group id
    pub fn groups(&self) -> Vec<&Group> {
        self.groups.values().collect()
    }

    /// Compute the report of every group, sorted by group id
    ///
    /// A group whose balances cannot be computed yields its error without
    /// affecting the other groups.
    pub fn reports(
        &self,
        config: &EngineConfig,
    ) -> Vec<(GroupId, Result<GroupReport, SettleError>)> {
        self.groups
            .iter()
            .map(|(id, group)| (id.clone(), GroupReport::compute(group, config)))
            .collect()
    }
}

/// Apply one record to the group it targets
///
/// The caller is responsible for resolving (or creating) the group named by
/// the record.
pub fn apply_record(group: &mut Group, record: LedgerRecord) -> Result<(), SettleError> {
    match record {
        LedgerRecord::AddMember { member, .. } => group.add_member(member),
        LedgerRecord::RenameMember { member, name, .. } => group.rename_member(&member, name),
        LedgerRecord::RemoveMember { member, .. } => group.remove_member(&member).map(|_| ()),
        LedgerRecord::AddExpense { expense, .. } => group.add_expense(expense),
        LedgerRecord::EditExpense { expense, .. } => group.edit_expense(expense),
        LedgerRecord::DeleteExpense { expense, .. } => {
            group.delete_expense(&expense).map(|_| ())
        }
    }
}
