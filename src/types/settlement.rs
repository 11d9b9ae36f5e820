//! Derived views over a group: balances and settlement instructions
//!
//! Neither type is ever stored. Both are recomputed from the current
//! member and expense lists whenever they are needed.

use super::member::MemberId;
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Net balance per member
///
/// Positive: the member is owed money (net creditor).
/// Negative: the member owes money (net debtor).
/// Zero: settled.
///
/// Entries keep the order in which members joined the group, which makes
/// every iteration over the balances reproducible.
pub type Balances = IndexMap<MemberId, Decimal>;

/// A single directed payment instruction
///
/// `from` must pay `to` the given `amount`, which is always positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// The paying member (a debtor)
    pub from: MemberId,

    /// The receiving member (a creditor)
    pub to: MemberId,

    /// Amount to transfer
    pub amount: Decimal,
}

impl Settlement {
    /// Create a new settlement instruction
    pub fn new(from: impl Into<MemberId>, to: impl Into<MemberId>, amount: Decimal) -> Self {
        Settlement {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}
