//! Spreadsheet export handler

use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use chrono::Utc;
use ct_export::{export_filename, write_workbook, OwnerLogins};
use ct_queries::{ContractFilter, RecordScope};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /contracts/export
///
/// Exports the currently visible record set: the requester's scope, narrowed
/// by the same filter parameters the list endpoint accepts. Administrators
/// get the extra "User" owner column.
pub async fn export_contracts(
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

    let owners: Option<OwnerLogins> = if auth.is_admin {
        let mut ids: Vec<_> = records.iter().map(|r| r.user_id).collect();
        ids.sort_unstable();
        ids.dedup();
        Some(
            state
                .users
                .logins_for(&ids)
                .await
                .map_err(|e| ApiError::internal(e.to_string()))?,
        )
    } else {
        None
    };

    let bytes = write_workbook(&records, owners.as_ref())
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::info!(
        user_id = auth.id,
        rows = records.len(),
        "contracts exported"
    );

    let disposition = format!("attachment; filename=\"{}\"", export_filename(Utc::now()));
    Ok((
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
