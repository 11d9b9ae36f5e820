//! Group aggregate
//!
//! A group owns its members and expenses. Every mutation keeps the group
//! consistent: expenses only ever reference current members, and removing a
//! member deletes every expense that member pays for or shares. Balances and
//! settlements are derived on demand and never stored.
//!
//! Each successful mutation appends an [`Activity`] to the group's log. A
//! rejected mutation changes nothing, log included.

use crate::config::EngineConfig;
use crate::core::balance::{compute_balances, validate_expense};
use crate::core::settlement::resolve_settlements;
use crate::types::{Activity, Balances, Expense, GroupId, Member, SettleError, Settlement};
use tracing::debug;

/// A group of members sharing expenses
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    id: GroupId,
    members: Vec<Member>,
    expenses: Vec<Expense>,
    activities: Vec<Activity>,
}

impl Group {
    /// Create an empty group
    pub fn new(id: impl Into<GroupId>) -> Self {
        Group {
            id: id.into(),
            members: Vec::new(),
            expenses: Vec::new(),
            activities: Vec::new(),
        }
    }

    /// The group identifier
    pub fn id(&self) -> &GroupId {
        &self.id
    }

    /// Members in the order they were added
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Expenses in the order they were recorded
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Activity log, oldest first
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Look up a member by id
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Whether `id` is a member of this group
    pub fn is_member(&self, id: &str) -> bool {
        self.member(id).is_some()
    }

    /// Add a member
    ///
    /// # Errors
    ///
    /// Returns an error if a member with the same id already exists.
    pub fn add_member(&mut self, member: Member) -> Result<(), SettleError> {
        if self.is_member(&member.id) {
            return Err(SettleError::duplicate_member(&self.id, &member.id));
        }
        self.record(Activity::MemberAdded {
            member: member.id.clone(),
            name: member.name.clone(),
        });
        self.members.push(member);
        Ok(())
    }

    /// Change a member's display name
    ///
    /// # Errors
    ///
    /// Returns an error if the member does not exist.
    pub fn rename_member(&mut self, id: &str, name: impl Into<String>) -> Result<(), SettleError> {
        let member = self
            .members
            .iter_mut()
            .find(|member| member.id == id)
            .ok_or_else(|| SettleError::unknown_member(&self.id, id))?;
        let new_name = name.into();
        let old_name = std::mem::replace(&mut member.name, new_name.clone());
        self.record(Activity::MemberRenamed {
            member: id.to_string(),
            old_name,
            new_name,
        });
        Ok(())
    }

    /// Remove a member and every expense it pays for or shares
    ///
    /// Returns the removed expenses.
    ///
    /// # Errors
    ///
    /// Returns an error if the member does not exist.
    pub fn remove_member(&mut self, id: &str) -> Result<Vec<Expense>, SettleError> {
        let position = self
            .members
            .iter()
            .position(|member| member.id == id)
            .ok_or_else(|| SettleError::unknown_member(&self.id, id))?;
        let member = self.members.remove(position);

        let (purged, kept): (Vec<Expense>, Vec<Expense>) = std::mem::take(&mut self.expenses)
            .into_iter()
            .partition(|expense| expense.involves(id));
        self.expenses = kept;

        debug!(
            group = %self.id,
            member = id,
            purged = purged.len(),
            "Removed member"
        );
        self.record(Activity::MemberRemoved {
            member: member.id,
            name: member.name,
            purged: purged.iter().map(|expense| expense.id.clone()).collect(),
        });
        Ok(purged)
    }

    /// Record a new expense
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An expense with the same id already exists
    /// - The expense is invalid for this group (see [`validate_expense`])
    pub fn add_expense(&mut self, expense: Expense) -> Result<(), SettleError> {
        if self.expense_position(&expense.id).is_some() {
            return Err(SettleError::duplicate_expense(&self.id, &expense.id));
        }
        validate_expense(&expense, |id| self.is_member(id))?;
        self.record(Activity::ExpenseAdded {
            expense: expense.id.clone(),
            description: expense.description.clone(),
            amount: expense.amount,
            paid_by: expense.paid_by.clone(),
        });
        self.expenses.push(expense);
        Ok(())
    }

    /// Replace an existing expense with the same id, keeping its position
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No expense with this id exists
    /// - The new expense is invalid for this group
    pub fn edit_expense(&mut self, expense: Expense) -> Result<(), SettleError> {
        let position = self
            .expense_position(&expense.id)
            .ok_or_else(|| SettleError::unknown_expense(&self.id, &expense.id))?;
        validate_expense(&expense, |id| self.is_member(id))?;
        self.record(Activity::ExpenseEdited {
            expense: expense.id.clone(),
            description: expense.description.clone(),
            amount: expense.amount,
            paid_by: expense.paid_by.clone(),
        });
        self.expenses[position] = expense;
        Ok(())
    }

    /// Delete an expense, returning it
    ///
    /// # Errors
    ///
    /// Returns an error if no expense with this id exists.
    pub fn delete_expense(&mut self, id: &str) -> Result<Expense, SettleError> {
        let position = self
            .expense_position(id)
            .ok_or_else(|| SettleError::unknown_expense(&self.id, id))?;
        let expense = self.expenses.remove(position);
        self.record(Activity::ExpenseDeleted {
            expense: expense.id.clone(),
            description: expense.description.clone(),
        });
        Ok(expense)
    }

    /// Net balance of every member
    pub fn balances(&self, config: &EngineConfig) -> Result<Balances, SettleError> {
        compute_balances(&self.members, &self.expenses, config)
    }

    /// Payments that settle the group
    pub fn settlements(&self, config: &EngineConfig) -> Result<Vec<Settlement>, SettleError> {
        Ok(resolve_settlements(&self.balances(config)?))
    }

    fn record(&mut self, activity: Activity) {
        debug!(group = %self.id, activity = activity.kind(), "Recorded activity");
        self.activities.push(activity);
    }

    fn expense_position(&self, id: &str) -> Option<usize> {
        self.expenses.iter().position(|expense| expense.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExpenseViolation;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn trip() -> Group {
        let mut group = Group::new("trip");
        group.add_member(Member::new("a", "Alice")).unwrap();
        group.add_member(Member::new("b", "Bob")).unwrap();
        group.add_member(Member::new("c", "Carol")).unwrap();
        group
            .add_expense(Expense::even("e1", "Groceries", dec("90"), "a", ids(&["a", "b", "c"])))
            .unwrap();
        group
            .add_expense(Expense::even("e2", "Taxi", dec("30"), "b", ids(&["b", "c"])))
            .unwrap();
        group
    }

    #[test]
    fn test_settlements_for_reference_scenario() {
        let settlements = trip().settlements(&EngineConfig::default()).unwrap();

        assert_eq!(
            settlements,
            vec![
                Settlement::new("c", "a", dec("45")),
                Settlement::new("b", "a", dec("15")),
            ]
        );
    }

    #[test]
    fn test_settlement_ties_follow_join_order() {
        let mut group = Group::new("camp");
        for (id, name) in [("z", "Zed"), ("y", "Yan"), ("b", "Bo"), ("a", "Al")] {
            group.add_member(Member::new(id, name)).unwrap();
        }
        group
            .add_expense(Expense::even("e1", "Tent", dec("10"), "b", ids(&["z"])))
            .unwrap();
        group
            .add_expense(Expense::even("e2", "Stove", dec("10"), "a", ids(&["y"])))
            .unwrap();

        let settlements = group.settlements(&EngineConfig::default()).unwrap();

        assert_eq!(
            settlements,
            vec![
                Settlement::new("z", "b", dec("10")),
                Settlement::new("y", "a", dec("10")),
            ]
        );
    }

    #[test]
    fn test_activity_log_records_every_mutation() {
        let mut group = trip();
        group.rename_member("b", "Robert").unwrap();
        group
            .edit_expense(Expense::even("e2", "Cab", dec("40"), "b", ids(&["b", "c"])))
            .unwrap();
        group.delete_expense("e1").unwrap();
        group.remove_member("c").unwrap();

        let kinds: Vec<&str> = group.activities().iter().map(Activity::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "member_added",
                "member_added",
                "member_added",
                "expense_added",
                "expense_added",
                "member_renamed",
                "expense_edited",
                "expense_deleted",
                "member_removed",
            ]
        );
        assert_eq!(
            group.activities()[5],
            Activity::MemberRenamed {
                member: "b".to_string(),
                old_name: "Bob".to_string(),
                new_name: "Robert".to_string(),
            }
        );
        assert_eq!(
            group.activities()[6],
            Activity::ExpenseEdited {
                expense: "e2".to_string(),
                description: "Cab".to_string(),
                amount: dec("40"),
                paid_by: "b".to_string(),
            }
        );
        assert_eq!(
            group.activities()[8],
            Activity::MemberRemoved {
                member: "c".to_string(),
                name: "Carol".to_string(),
                purged: vec!["e2".to_string()],
            }
        );
    }

    #[test]
    fn test_rejected_mutation_is_not_logged() {
        let mut group = trip();

        assert!(group.add_member(Member::new("a", "Again")).is_err());
        assert!(group.delete_expense("e9").is_err());
        assert!(group
            .add_expense(Expense::even("e3", "Boat", dec("-1"), "a", ids(&["a"])))
            .is_err());

        assert_eq!(group.activities().len(), 5);
    }

    #[test]
    fn test_add_member_rejects_duplicate() {
        let mut group = trip();

        let result = group.add_member(Member::new("a", "Another Alice"));

        assert_eq!(result, Err(SettleError::duplicate_member("trip", "a")));
        assert_eq!(group.members().len(), 3);
    }

    #[test]
    fn test_rename_member() {
        let mut group = trip();

        group.rename_member("b", "Robert").unwrap();

        assert_eq!(group.member("b").map(|m| m.name.as_str()), Some("Robert"));
        assert_eq!(
            group.rename_member("z", "Zed"),
            Err(SettleError::unknown_member("trip", "z"))
        );
    }

    #[test]
    fn test_remove_member_purges_its_expenses() {
        let mut group = trip();
        group.add_member(Member::new("d", "Dave")).unwrap();
        group
            .add_expense(Expense::even("e3", "Coffee", dec("8"), "a", ids(&["a", "d"])))
            .unwrap();

        let purged = group.remove_member("c").unwrap();

        let purged_ids: Vec<&str> = purged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(purged_ids, vec!["e1", "e2"]);
        assert_eq!(group.expenses().len(), 1);
        assert!(!group.is_member("c"));

        let balances = group.balances(&EngineConfig::default()).unwrap();
        assert_eq!(balances["a"], dec("4"));
        assert_eq!(balances["b"], Decimal::ZERO);
        assert_eq!(balances["d"], dec("-4"));
    }

    #[test]
    fn test_remove_unknown_member() {
        let mut group = trip();

        assert_eq!(
            group.remove_member("z"),
            Err(SettleError::unknown_member("trip", "z"))
        );
    }

    #[test]
    fn test_add_expense_rejects_unknown_participant() {
        let mut group = trip();

        let result =
            group.add_expense(Expense::even("e3", "Boat", dec("10"), "a", ids(&["a", "z"])));

        assert_eq!(
            result,
            Err(SettleError::invalid_expense(
                "e3",
                ExpenseViolation::UnknownParticipant {
                    member: "z".to_string()
                }
            ))
        );
        assert_eq!(group.expenses().len(), 2);
    }

    #[test]
    fn test_add_expense_rejects_duplicate_id() {
        let mut group = trip();

        let result = group.add_expense(Expense::even("e1", "Again", dec("10"), "a", ids(&["a"])));

        assert_eq!(result, Err(SettleError::duplicate_expense("trip", "e1")));
    }

    #[test]
    fn test_edit_expense_keeps_position() {
        let mut group = trip();

        group
            .edit_expense(Expense::even("e1", "Groceries", dec("60"), "a", ids(&["a", "b", "c"])))
            .unwrap();

        assert_eq!(group.expenses()[0].amount, dec("60"));
        let balances = group.balances(&EngineConfig::default()).unwrap();
        assert_eq!(balances["a"], dec("40"));
        assert_eq!(balances["b"], dec("-5"));
        assert_eq!(balances["c"], dec("-35"));
    }

    #[test]
    fn test_edit_unknown_expense() {
        let mut group = trip();

        let result = group.edit_expense(Expense::even("e9", "Ghost", dec("1"), "a", ids(&["a"])));

        assert_eq!(result, Err(SettleError::unknown_expense("trip", "e9")));
    }

    #[test]
    fn test_delete_expense() {
        let mut group = trip();

        let deleted = group.delete_expense("e2").unwrap();

        assert_eq!(deleted.description, "Taxi");
        let balances = group.balances(&EngineConfig::default()).unwrap();
        assert_eq!(balances["b"], dec("-30"));
        assert_eq!(
            group.delete_expense("e2"),
            Err(SettleError::unknown_expense("trip", "e2"))
        );
    }
}
