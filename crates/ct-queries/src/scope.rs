//! Record scoping
//!
//! Every read of the contract store goes through a `RecordScope`:
//! administrators see all records, everyone else only their own.

use ct_core::traits::{Id, Owned};

/// The permitted record set for a requesting identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// Unrestricted access (administrators)
    All,
    /// Only records owned by this user
    Owner(Id),
}

impl RecordScope {
    /// Build the scope for a requesting identity
    pub fn for_identity(user_id: Id, is_admin: bool) -> Self {
        if is_admin {
            RecordScope::All
        } else {
            RecordScope::Owner(user_id)
        }
    }

    /// Whether an owned entity is inside this scope
    pub fn contains<T: Owned>(&self, record: &T) -> bool {
        match self {
            RecordScope::All => true,
            RecordScope::Owner(user_id) => record.owner_id() == *user_id,
        }
    }
}
