//! Store traits
//!
//! The API layer depends on these traits rather than on concrete Postgres
//! types, so handlers can be exercised against the in-memory implementations
//! in `memory`.

use async_trait::async_trait;
use ct_core::traits::Id;
use ct_models::{ContractRecord, ContractUpdate, NewContract, User};
use ct_queries::{ContractFilter, RecordScope};
use std::collections::HashMap;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable")]
    Unavailable,
}

/// Result type for store operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Contract record store.
///
/// Reads take a [`RecordScope`] so the visible set is decided in one place;
/// `list` additionally applies the user-supplied filter. Result order is
/// deterministic: entry date ascending, then id.
#[async_trait]
pub trait ContractStore: Send + Sync {
    /// List the scoped, filtered record set
    async fn list(
        &self,
        scope: RecordScope,
        filter: &ContractFilter,
    ) -> RepositoryResult<Vec<ContractRecord>>;

    /// Find a record by id, regardless of scope. Callers are responsible for
    /// the ownership check before exposing or mutating the record.
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ContractRecord>>;

    /// Create a record owned by `owner_id`
    async fn create(&self, owner_id: Id, payload: NewContract) -> RepositoryResult<ContractRecord>;

    /// Apply an update to an existing record. The owner never changes.
    async fn update(&self, id: Id, update: ContractUpdate) -> RepositoryResult<ContractRecord>;

    /// Delete a record by id
    async fn delete(&self, id: Id) -> RepositoryResult<()>;
}

/// Fields needed to persist a new user
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub login: String,
    pub mail: String,
    pub admin: bool,
    pub hashed_password: String,
}

/// User account store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<User>>;

    async fn find_by_login(&self, login: &str) -> RepositoryResult<Option<User>>;

    /// Create a user. A duplicate login is a `Conflict`.
    async fn create(&self, user: NewUserRecord) -> RepositoryResult<User>;

    /// Resolve owner logins for a set of user ids (used by the admin export)
    async fn logins_for(&self, ids: &[Id]) -> RepositoryResult<HashMap<Id, String>>;
}
