//! Axum extractors and shared application state

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use ct_auth::{extract_session_id, CookieConfig, CurrentUser, SessionStore};
use ct_core::config::AppConfig;
use ct_db::{ContractStore, UserStore};
use std::sync::Arc;

use crate::error::ApiError;

/// Application state: the stores behind trait objects so handlers can be
/// exercised against in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub contracts: Arc<dyn ContractStore>,
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Arc<AppConfig>,
    pub cookies: CookieConfig,
}

impl AppState {
    pub fn new(
        contracts: Arc<dyn ContractStore>,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        config: AppConfig,
    ) -> Self {
        let cookies = if config.auth.secure_cookies {
            CookieConfig::default()
        } else {
            CookieConfig::development()
        };
        Self {
            contracts,
            users,
            sessions,
            config: Arc::new(config),
            cookies,
        }
    }
}

/// The authenticated requester, resolved from the session cookie.
///
/// Adding this extractor to a handler is the auth gate: requests without a
/// valid session are rejected with 401 before the handler body runs.
pub struct AuthenticatedUser {
    pub user: CurrentUser,
    pub session_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let cookie_header = parts
            .headers
            .get("cookie")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        let session_id = extract_session_id(cookie_header, &state.cookies.name)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        let session = state
            .sessions
            .get(&session_id)
            .ok_or_else(|| ApiError::unauthorized("Session expired or invalid"))?;

        let user = state
            .users
            .find_by_id(session.user_id)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?
            .ok_or_else(|| ApiError::unauthorized("Session expired or invalid"))?;

        let current = if user.admin {
            CurrentUser::admin(user.id, user.login)
        } else {
            CurrentUser::new(user.id, user.login)
        };

        Ok(AuthenticatedUser {
            user: current,
            session_id,
        })
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = CurrentUser;
    fn deref(&self) -> &Self::Target {
        &self.user
    }
}
