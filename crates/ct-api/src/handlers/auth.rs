//! Authentication handlers: sign-up, sign-in, sign-out

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use ct_auth::{hash_password, verify_password, CurrentUser, Session};
use ct_db::{NewUserRecord, RepositoryError};
use ct_models::{Credentials, Signup};
use validator::Validate;

use crate::error::{payload_errors, ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

/// POST /auth/signup
///
/// Always creates a standard (non-admin) account. A duplicate login surfaces
/// as a validation failure on the `login` field.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<Signup>,
) -> ApiResult<impl IntoResponse> {
    let mut errors = match payload.validate() {
        Ok(()) => ct_core::error::ValidationErrors::new(),
        Err(e) => payload_errors(e),
    };
    let password_errors = payload.password_errors(state.config.auth.password_min_length);
    for (field, messages) in password_errors.errors {
        for message in messages {
            errors.add(field.clone(), message);
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let hashed_password =
        hash_password(&payload.password).map_err(|e| ApiError::internal(e.to_string()))?;

    let user = state
        .users
        .create(NewUserRecord {
            login: payload.login,
            mail: payload.mail,
            admin: false,
            hashed_password,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                let mut errors = ct_core::error::ValidationErrors::new();
                errors.add("login", "is already taken");
                ApiError::Validation(errors)
            }
            other => ApiError::internal(other.to_string()),
        })?;

    tracing::info!(user_id = user.id, login = %user.login, "account created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/signin
///
/// Verifies credentials and establishes a server-side session. The failure
/// message never says which of login or password was wrong.
pub async fn signin(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .users
        .find_by_login(&credentials.login)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::unauthorized("Username or password is incorrect"))?;

    let password_ok = verify_password(&credentials.password, &user.hashed_password)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    if !password_ok {
        return Err(ApiError::unauthorized("Username or password is incorrect"));
    }

    let session = Session::new(user.id, state.config.auth.session_lifetime_seconds);
    let cookie = state.cookies.build_cookie(&session.id);
    state
        .sessions
        .set(session)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::info!(user_id = user.id, login = %user.login, "signed in");

    let current = if user.admin {
        CurrentUser::admin(user.id, user.login)
    } else {
        CurrentUser::new(user.id, user.login)
    };
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(current)))
}

/// POST /auth/signout
pub async fn signout(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> ApiResult<impl IntoResponse> {
    state
        .sessions
        .delete(&auth.session_id)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let clear = state.cookies.build_clear_cookie();
    Ok((AppendHeaders([(SET_COOKIE, clear)]), StatusCode::NO_CONTENT))
}
