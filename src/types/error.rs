//! Error types for the settlement engine
//!
//! This module defines all error types that can occur while reading a ledger,
//! mutating groups and computing balances. Errors are designed to be
//! descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid ledger rows
//! - **Group Errors**: Unknown or duplicate members, expenses and groups
//! - **Expense Validation Errors**: Expenses violating a precondition of the calculator
//! - **Arithmetic Errors**: Overflow in balance calculations

use rust_decimal::Decimal;
use thiserror::Error;

/// Precondition violated by an expense
///
/// The balance calculator refuses to run on an expense that breaks any of
/// these, rather than producing meaningless numbers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpenseViolation {
    /// Amount is zero or negative
    #[error("amount {amount} must be positive")]
    NonPositiveAmount { amount: Decimal },

    /// Nobody shares the expense
    #[error("no participants to split with")]
    NoParticipants,

    /// Payer is not a member of the group
    #[error("payer '{member}' is not a member")]
    UnknownPayer { member: String },

    /// A participant is not a member of the group
    #[error("participant '{member}' is not a member")]
    UnknownParticipant { member: String },

    /// Split amounts are not aligned with participants
    #[error("{amounts} split amounts for {participants} participants")]
    SplitCountMismatch { amounts: usize, participants: usize },

    /// A split amount is negative
    #[error("split amount {amount} is negative")]
    NegativeSplit { amount: Decimal },

    /// Split amounts do not add up to the expense amount
    #[error("split amounts sum to {sum}, expected {amount}")]
    SplitSumMismatch { sum: Decimal, amount: Decimal },
}

/// Main error type for the settlement engine
///
/// This enum represents all possible errors that can occur during ledger
/// processing. Each variant includes relevant context to help diagnose
/// and resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettleError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed row is skipped
    /// and processing continues with the next one.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A well-formed CSV row that does not describe a valid ledger record
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// What is wrong with the row
        message: String,
    },

    /// Expense violates a calculator precondition
    #[error("Invalid expense '{expense}': {violation}")]
    InvalidExpense {
        /// Offending expense id
        expense: String,
        /// The violated constraint
        violation: ExpenseViolation,
    },

    /// Group referenced by a record does not exist
    #[error("Group '{group}' not found")]
    UnknownGroup { group: String },

    /// Member referenced by an operation does not exist
    #[error("Member '{member}' not found in group '{group}'")]
    UnknownMember { group: String, member: String },

    /// Expense referenced by an operation does not exist
    #[error("Expense '{expense}' not found in group '{group}'")]
    UnknownExpense { group: String, expense: String },

    /// Member id already used in the group
    #[error("Duplicate member '{member}' in group '{group}'")]
    DuplicateMember { group: String, member: String },

    /// Expense id already used in the group
    #[error("Duplicate expense '{expense}' in group '{group}'")]
    DuplicateExpense { group: String, expense: String },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },
}

impl From<std::io::Error> for SettleError {
    fn from(error: std::io::Error) -> Self {
        SettleError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for SettleError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        SettleError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SettleError {
    /// Create an InvalidExpense error
    pub fn invalid_expense(expense: &str, violation: ExpenseViolation) -> Self {
        SettleError::InvalidExpense {
            expense: expense.to_string(),
            violation,
        }
    }

    /// Create an InvalidRecord error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        SettleError::InvalidRecord {
            message: message.into(),
        }
    }

    /// Create an UnknownGroup error
    pub fn unknown_group(group: &str) -> Self {
        SettleError::UnknownGroup {
            group: group.to_string(),
        }
    }

    /// Create an UnknownMember error
    pub fn unknown_member(group: &str, member: &str) -> Self {
        SettleError::UnknownMember {
            group: group.to_string(),
            member: member.to_string(),
        }
    }

    /// Create an UnknownExpense error
    pub fn unknown_expense(group: &str, expense: &str) -> Self {
        SettleError::UnknownExpense {
            group: group.to_string(),
            expense: expense.to_string(),
        }
    }

    /// Create a DuplicateMember error
    pub fn duplicate_member(group: &str, member: &str) -> Self {
        SettleError::DuplicateMember {
            group: group.to_string(),
            member: member.to_string(),
        }
    }

    /// Create a DuplicateExpense error
    pub fn duplicate_expense(group: &str, expense: &str) -> Self {
        SettleError::DuplicateExpense {
            group: group.to_string(),
            expense: expense.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        SettleError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }
}
