//! Session authentication
//!
//! Server-side sessions identified by a random cookie value. Sessions only
//! exist for authenticated users; anonymous requests simply carry no valid
//! cookie.

use chrono::{DateTime, Utc};
use ct_core::traits::Id;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session store unavailable")]
    StoreUnavailable,
}

/// An authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session ID (the cookie value)
    pub id: String,
    /// The authenticated user
    pub user_id: Id,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Expiration time
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for a user
    pub fn new(user_id: Id, lifetime_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id: generate_session_id(),
            user_id,
            created_at: now,
            expires_at: now + chrono::Duration::seconds(lifetime_seconds),
        }
    }

    /// Check if the session is still valid
    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

/// Generate a secure random session ID
fn generate_session_id() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    const SESSION_ID_LENGTH: usize = 64;

    let mut rng = rand::rng();
    (0..SESSION_ID_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Session store trait for different backends
pub trait SessionStore: Send + Sync {
    /// Get a valid session by ID
    fn get(&self, session_id: &str) -> Option<Session>;

    /// Store a session
    fn set(&self, session: Session) -> Result<(), SessionError>;

    /// Delete a session
    fn delete(&self, session_id: &str) -> Result<(), SessionError>;
}

/// In-memory session store
///
/// Abandoned sessions are purged on every `set`, so the map never holds
/// expired entries past the next sign-in.
pub struct MemorySessionStore {
    sessions: std::sync::RwLock<HashMap<String, Session>>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: std::sync::RwLock::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.read().ok()?;
        sessions.get(session_id).cloned().filter(|s| s.is_valid())
    }

    fn set(&self, session: Session) -> Result<(), SessionError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::StoreUnavailable)?;
        let now = Utc::now();
        sessions.retain(|_, s| s.expires_at >= now);
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    fn delete(&self, session_id: &str) -> Result<(), SessionError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::StoreUnavailable)?;
        sessions.remove(session_id);
        Ok(())
    }
}

/// Cookie configuration for sessions
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site_lax: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "_contractdesk_session".to_string(),
            path: "/".to_string(),
            secure: true,
            http_only: true,
            same_site_lax: true,
        }
    }
}

impl CookieConfig {
    /// Create a development configuration (non-secure)
    pub fn development() -> Self {
        Self {
            secure: false,
            ..Default::default()
        }
    }

    /// Build the Set-Cookie header value for a session
    pub fn build_cookie(&self, session_id: &str) -> String {
        let mut parts = vec![format!("{}={}", self.name, session_id)];

        parts.push(format!("Path={}", self.path));

        if self.secure {
            parts.push("Secure".to_string());
        }

        if self.http_only {
            parts.push("HttpOnly".to_string());
        }

        if self.same_site_lax {
            parts.push("SameSite=Lax".to_string());
        }

        parts.join("; ")
    }

    /// Build the Set-Cookie header value that clears the session
    pub fn build_clear_cookie(&self) -> String {
        format!("{}=; Path={}; Max-Age=0; HttpOnly", self.name, self.path)
    }
}

/// Extract a session ID from a Cookie header value
pub fn extract_session_id(cookie_header: &str, cookie_name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let part = part.trim();
        if let Some((name, value)) = part.split_once('=') {
            if name.trim() == cookie_name {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}
