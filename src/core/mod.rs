//! Core business logic module
//!
//! This module contains the settlement components:
//! - `balance` - Balance calculator (net balance per member)
//! - `settlement` - Greedy settlement resolver
//! - `group` - Group aggregate (members, expenses, mutations)
//! - `summary` - Per-member summaries and group reports
//! - `engine` - Ledger record processing
//! - `async` - Concurrent record processing

pub mod r#async;
pub mod balance;
pub mod engine;
pub mod group;
pub mod settlement;
pub mod summary;

pub use balance::{compute_balances, split_evenly, validate_expense};
pub use engine::{apply_record, LedgerEngine};
pub use group::Group;
pub use r#async::{AsyncLedgerEngine, BatchProcessor};
pub use settlement::resolve_settlements;
pub use summary::{GroupReport, GroupSummary, MemberBalance};
