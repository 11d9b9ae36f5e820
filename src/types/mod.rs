//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `member`: Group members and identifiers
//! - `activity`: Group activity log entries
//! - `expense`: Recorded shared expenses
//! - `settlement`: Derived balances and settlement instructions
//! - `record`: Ledger records read from the input stream
//! - `error`: Error types for the settlement engine

pub mod activity;
pub mod error;
pub mod expense;
pub mod member;
pub mod record;
pub mod settlement;

pub use activity::Activity;
pub use error::{ExpenseViolation, SettleError};
pub use expense::{Expense, ExpenseId};
pub use member::{GroupId, Member, MemberId};
pub use record::LedgerRecord;
pub use settlement::{Balances, Settlement};
