//! Member-related types
//!
//! Members are owned by their group and referenced by id from expenses.

/// Member identifier, unique within a group
pub type MemberId = String;

/// Group identifier
pub type GroupId = String;

/// A participant of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Identifier referenced by expenses and settlements
    pub id: MemberId,

    /// Display name shown in reports
    pub name: String,
}

impl Member {
    /// Create a new member
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Member {
            id: id.into(),
            name: name.into(),
        }
    }
}
