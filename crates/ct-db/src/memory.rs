//! In-memory store implementations
//!
//! Used by handler tests so the full request path can run without Postgres.
//! Filter and scope semantics must match the Postgres store exactly.

use async_trait::async_trait;
use chrono::Utc;
use ct_core::traits::Id;
use ct_models::{ContractRecord, ContractUpdate, NewContract, User};
use ct_queries::{ContractFilter, RecordScope};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::repository::{
    ContractStore, NewUserRecord, RepositoryError, RepositoryResult, UserStore,
};

/// In-memory contract store
#[derive(Default)]
pub struct MemoryContractStore {
    inner: Mutex<ContractsInner>,
}

#[derive(Default)]
struct ContractsInner {
    records: HashMap<Id, ContractRecord>,
    next_id: Id,
}

impl MemoryContractStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractStore for MemoryContractStore {
    async fn list(
        &self,
        scope: RecordScope,
        filter: &ContractFilter,
    ) -> RepositoryResult<Vec<ContractRecord>> {
        let inner = self.inner.lock().map_err(|_| RepositoryError::Unavailable)?;
        let mut records: Vec<ContractRecord> = inner
            .records
            .values()
            .filter(|r| scope.contains(*r) && filter.matches(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ContractRecord>> {
        let inner = self.inner.lock().map_err(|_| RepositoryError::Unavailable)?;
        Ok(inner.records.get(&id).cloned())
    }

    async fn create(&self, owner_id: Id, payload: NewContract) -> RepositoryResult<ContractRecord> {
        let mut inner = self.inner.lock().map_err(|_| RepositoryError::Unavailable)?;
        inner.next_id += 1;
        let record = ContractRecord {
            id: inner.next_id,
            user_id: owner_id,
            client_name: payload.client_name,
            date: payload.date,
            modified_at: Utc::now(),
            contact_number: payload.contact_number,
            vendor_name: payload.vendor_name,
            vendor_company: payload.vendor_company,
            rate: payload.rate,
            currency: payload.currency,
            contract_type: payload.contract_type,
            status: payload.status,
            comments: payload.comments,
        };
        inner.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Id, update: ContractUpdate) -> RepositoryResult<ContractRecord> {
        let mut inner = self.inner.lock().map_err(|_| RepositoryError::Unavailable)?;
        let existing = inner
            .records
            .get(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Contract {}", id)))?;
        let updated = update.apply_to(existing, Utc::now());
        inner.records.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let mut inner = self.inner.lock().map_err(|_| RepositoryError::Unavailable)?;
        inner
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(format!("Contract {}", id)))
    }
}

/// In-memory user store
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<UsersInner>,
}

#[derive(Default)]
struct UsersInner {
    users: HashMap<Id, User>,
    next_id: Id,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<User>> {
        let inner = self.inner.lock().map_err(|_| RepositoryError::Unavailable)?;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> RepositoryResult<Option<User>> {
        let inner = self.inner.lock().map_err(|_| RepositoryError::Unavailable)?;
        Ok(inner.users.values().find(|u| u.login == login).cloned())
    }

    async fn create(&self, user: NewUserRecord) -> RepositoryResult<User> {
        let mut inner = self.inner.lock().map_err(|_| RepositoryError::Unavailable)?;
        if inner.users.values().any(|u| u.login == user.login) {
            return Err(RepositoryError::Conflict(format!(
                "login {} is already taken",
                user.login
            )));
        }
        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            login: user.login,
            mail: user.mail,
            admin: user.admin,
            hashed_password: user.hashed_password,
            created_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn logins_for(&self, ids: &[Id]) -> RepositoryResult<HashMap<Id, String>> {
        let inner = self.inner.lock().map_err(|_| RepositoryError::Unavailable)?;
        Ok(ids
            .iter()
            .filter_map(|id| inner.users.get(id).map(|u| (*id, u.login.clone())))
            .collect())
    }
}
