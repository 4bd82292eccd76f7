//! # ct-api
//!
//! HTTP API for ContractDesk RS.
//!
//! Axum handlers for authentication, contract CRUD, and the spreadsheet
//! export, plus the session-cookie extractor and the error-to-status mapping.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use extractors::{AppState, AuthenticatedUser};
pub use routes::router;
