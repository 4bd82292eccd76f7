//! Contract record handlers
//!
//! Reads go through the requester's [`RecordScope`]; single-record access and
//! every mutation re-checks the owner-or-administrator rule against the
//! stored record.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use ct_core::traits::Id;
use ct_models::{ContractRecord, ContractUpdate, NewContract};
use ct_queries::{ContractFilter, RecordScope};
use serde::Serialize;
use validator::Validate;

use crate::error::{payload_errors, ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Serialize)]
pub struct ContractCollection {
    pub count: usize,
    pub records: Vec<ContractRecord>,
}

/// GET /contracts
pub async fn list_contracts(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Query(filter): Query<ContractFilter>,
) -> ApiResult<impl IntoResponse> {
    let scope = RecordScope::for_identity(auth.id, auth.is_admin);
    let records = state
        .contracts
        .list(scope, &filter)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(ContractCollection {
        count: records.len(),
        records,
    }))
}

/// POST /contracts
///
/// The owner is always the authenticated requester; the payload has no say.
pub async fn create_contract(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(payload): Json<NewContract>,
) -> ApiResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(payload_errors(e)))?;

    let record = state
        .contracts
        .create(auth.id, payload)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::info!(contract_id = record.id, user_id = auth.id, "contract created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /contracts/:id
pub async fn get_contract(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let record = fetch_accessible(&state, &auth, id).await?;
    Ok(Json(record))
}

/// PATCH /contracts/:id
pub async fn update_contract(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<Id>,
    Json(payload): Json<ContractUpdate>,
) -> ApiResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(payload_errors(e)))?;

    // Ownership is checked against the record as stored
    fetch_accessible(&state, &auth, id).await?;

    let record = state
        .contracts
        .update(id, payload)
        .await
        .map_err(|e| ApiError::from_repository("Contract", id, e))?;

    Ok(Json(record))
}

/// DELETE /contracts/:id
pub async fn delete_contract(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    fetch_accessible(&state, &auth, id).await?;

    state
        .contracts
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository("Contract", id, e))?;

    tracing::info!(contract_id = id, user_id = auth.id, "contract deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch a record and apply the owner-or-administrator rule
async fn fetch_accessible(
    state: &AppState,
    auth: &AuthenticatedUser,
    id: Id,
) -> ApiResult<ContractRecord> {
    let record = state
        .contracts
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Contract", id))?;

    if !auth.can_access(record.user_id) {
        return Err(ApiError::forbidden(
            "You don't have permission to access this record",
        ));
    }
    Ok(record)
}
