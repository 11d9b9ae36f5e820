//! Thread-safe ledger engine for async batch processing
//!
//! This module provides the `AsyncLedgerEngine` struct, which applies ledger
//! records to groups stored in a `DashMap`. Each group sits behind its own
//! shard lock, so tasks working on different groups never wait on each other
//! while a record is applied atomically to its group.

use dashmap::DashMap;

use crate::core::engine::apply_record;
use crate::core::group::Group;
use crate::types::{GroupId, LedgerRecord, SettleError};

/// Thread-safe ledger engine
///
/// Shares the record semantics of [`crate::core::LedgerEngine`]; only the
/// storage differs.
#[derive(Debug, Default)]
pub struct AsyncLedgerEngine {
    /// Groups by id
    groups: DashMap<GroupId, Group>,
}

impl AsyncLedgerEngine {
    /// Create a new empty AsyncLedgerEngine
    pub fn new() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }

    /// Apply a single ledger record
    ///
    /// The target group stays locked while the record is applied, so no other
    /// thread can observe a partially updated group.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record references a group that does not exist yet
    /// - The group rejects the operation
    pub fn process_record(&self, record: LedgerRecord) -> Result<(), SettleError> {
        let key = record.group().clone();

        let mut group = if matches!(record, LedgerRecord::AddMember { .. }) {
            self.groups
                .entry(key.clone())
                .or_insert_with(|| Group::new(key))
        } else {
            self.groups
                .get_mut(&key)
                .ok_or_else(|| SettleError::unknown_group(&key))?
        };

        apply_record(group.value_mut(), record)
    }

    /// Copy of a single group
    pub fn group(&self, id: &str) -> Option<Group> {
        self.groups.get(id).map(|group| group.value().clone())
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group exists yet
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Copies of all groups, sorted by group id
    ///
    /// The copies are detached from the engine and safe to hand to other
    /// tasks for calculation.
    pub fn snapshot(&self) -> Vec<Group> {
        let mut groups: Vec<Group> = self
            .groups
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        groups.sort_by(|a, b| a.id().cmp(b.id()));
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Expense, Member};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::thread;

    fn member(group: &str, id: &str) -> LedgerRecord {
        LedgerRecord::AddMember {
            group: group.to_string(),
            member: Member::new(id, id.to_uppercase()),
        }
    }

    #[test]
    fn test_member_record_creates_group() {
        let engine = AsyncLedgerEngine::new();

        engine.process_record(member("trip", "a")).unwrap();

        assert_eq!(engine.len(), 1);
        assert_eq!(engine.group("trip").unwrap().members().len(), 1);
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        let engine = AsyncLedgerEngine::new();

        let result = engine.process_record(LedgerRecord::DeleteExpense {
            group: "trip".to_string(),
            expense: "e1".to_string(),
        });

        assert_eq!(result, Err(SettleError::unknown_group("trip")));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_expense_is_validated() {
        let engine = AsyncLedgerEngine::new();
        engine.process_record(member("trip", "a")).unwrap();

        let result = engine.process_record(LedgerRecord::AddExpense {
            group: "trip".to_string(),
            expense: Expense::even("e1", "Boat", Decimal::new(1000, 2), "a", vec![]),
        });

        assert!(matches!(result, Err(SettleError::InvalidExpense { .. })));
        assert!(engine.group("trip").unwrap().expenses().is_empty());
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let engine = AsyncLedgerEngine::new();
        for group in ["zoo", "attic", "mall"] {
            engine.process_record(member(group, "a")).unwrap();
        }

        let ids: Vec<String> = engine.snapshot().iter().map(|g| g.id().clone()).collect();

        assert_eq!(ids, vec!["attic", "mall", "zoo"]);
    }

    #[test]
    fn test_concurrent_members_in_different_groups() {
        let engine = Arc::new(AsyncLedgerEngine::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    for m in 0..10 {
                        engine
                            .process_record(member(&format!("g{}", i), &format!("m{}", m)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.len(), 8);
        assert!(engine
            .snapshot()
            .iter()
            .all(|group| group.members().len() == 10));
    }
}
