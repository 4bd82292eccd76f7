//! # ct-auth
//!
//! Authentication and authorization for ContractDesk RS.
//!
//! ## Features
//!
//! - Argon2 password hashing
//! - Session-based authentication with server-side session storage
//! - Ownership checks (owner-or-administrator access rule)

pub mod password;
pub mod permissions;
pub mod session;

pub use password::{hash_password, verify_password, PasswordError};
pub use permissions::CurrentUser;
pub use session::{
    extract_session_id, CookieConfig, MemorySessionStore, Session, SessionError, SessionStore,
};
