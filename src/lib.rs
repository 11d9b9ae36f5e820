//! Split Settle Library
//! # Overview
//!
//! This library computes who owes whom inside groups of people sharing
//! expenses, and turns the result into a short list of payments. Ledgers are
//! read as CSV streams with either a sync or an async strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Member, Expense, Settlement, LedgerRecord, errors)
//! - [`config`] - Calculation settings
//! - [`cli`] - CLI arguments parsing and log setup
//! - [`core`] - Business logic components:
//!   - [`core::balance`] - Net balance of every member
//!   - [`core::settlement`] - Greedy debtor/creditor matching
//!   - [`core::group`] - Group aggregate and its mutations
//!   - [`core::engine`] - Ledger record processing
//! - [`io`] - Ledger parsing and report output
//! - [`strategy`] - Sync and async processing pipelines
//!
//! # Balances
//!
//! For every expense the payer is credited the full amount and each
//! participant is debited its share: the explicit split amount when given,
//! otherwise an even share. Even shares are allocated in currency minor units
//! so they always add up to the amount exactly. Balances of a group always
//! sum to zero.
//!
//! # Settlements
//!
//! Debtors and creditors are sorted largest first and matched greedily, equal
//! amounts in the order members joined the group. The result settles every balance with at most one payment fewer than the
//! number of members holding a non-zero balance.

pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use config::EngineConfig;
pub use core::{
    compute_balances, resolve_settlements, split_evenly, Group, GroupReport, LedgerEngine,
};
pub use io::write_report;
pub use types::{
    Activity, Balances, Expense, ExpenseId, ExpenseViolation, GroupId, LedgerRecord, Member,
    MemberId, SettleError, Settlement,
};
