//! Permissions
//!
//! The application has exactly one access rule: administrators may read and
//! mutate every record, everyone else only records they own.

use ct_core::traits::Id;
use serde::{Deserialize, Serialize};

/// The authenticated identity attached to a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Id,
    pub login: String,
    pub is_admin: bool,
}

impl CurrentUser {
    /// Create a standard user identity
    pub fn new(id: Id, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            is_admin: false,
        }
    }

    /// Create an administrator identity
    pub fn admin(id: Id, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            is_admin: true,
        }
    }

    /// Owner-or-administrator rule for mutating or reading a single record
    pub fn can_access(&self, owner_id: Id) -> bool {
        self.is_admin || self.id == owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_user_can_access_own_records_only() {
        let user = CurrentUser::new(7, "alice");
        assert!(user.can_access(7));
        assert!(!user.can_access(8));
    }

    #[test]
    fn test_admin_can_access_everything() {
        let admin = CurrentUser::admin(1, "root");
        assert!(admin.can_access(1));
        assert!(admin.can_access(999));
    }
}
