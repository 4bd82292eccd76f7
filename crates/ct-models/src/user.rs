//! User entity and authentication payloads

use chrono::{DateTime, Utc};
use ct_core::error::ValidationErrors;
use ct_core::traits::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Id,

    /// Login name (unique)
    pub login: String,

    /// Email address
    pub mail: String,

    /// Administrators have unrestricted access to all records
    pub admin: bool,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub hashed_password: String,

    pub created_at: DateTime<Utc>,
}

/// Sign-up payload.
///
/// Sign-up always produces a standard (non-admin) account; the admin flag is
/// data-driven and never taken from request input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Signup {
    #[validate(length(min = 1, max = 255))]
    pub login: String,

    #[validate(email)]
    pub mail: String,

    pub password: String,
    pub password_confirmation: String,
}

impl Signup {
    /// Password checks that depend on runtime configuration, which the
    /// `validator` derive cannot express.
    pub fn password_errors(&self, min_length: usize) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.password.chars().count() < min_length {
            errors.add(
                "password",
                format!("must be at least {} characters long", min_length),
            );
        }
        if self.password != self.password_confirmation {
            errors.add("password_confirmation", "does not match password");
        }
        errors
    }
}

/// Sign-in payload
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, confirmation: &str) -> Signup {
        Signup {
            login: "alice".into(),
            mail: "alice@example.com".into(),
            password: password.into(),
            password_confirmation: confirmation.into(),
        }
    }

    #[test]
    fn test_password_too_short() {
        let errors = signup("short", "short").password_errors(8);
        assert!(errors.has_error("password"));
        assert!(!errors.has_error("password_confirmation"));
    }

    #[test]
    fn test_password_mismatch() {
        let errors = signup("long enough", "different").password_errors(8);
        assert!(errors.has_error("password_confirmation"));
    }

    #[test]
    fn test_valid_password() {
        let errors = signup("long enough", "long enough").password_errors(8);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_signup_email_validation() {
        let payload = Signup {
            login: "alice".into(),
            mail: "not-an-email".into(),
            password: "long enough".into(),
            password_confirmation: "long enough".into(),
        };
        assert!(payload.validate().is_err());
    }
}
