//! # ct-db
//!
//! Database layer for ContractDesk RS.
//!
//! This crate provides PostgreSQL access using SQLx, including:
//!
//! - Connection pool management
//! - Store traits (`ContractStore`, `UserStore`) used as the dependency
//!   injection seam for the API layer
//! - Postgres implementations of both stores
//! - In-memory implementations used by handler tests
//!
//! ## Example
//!
//! ```ignore
//! use ct_db::{Database, DatabaseConfig, ContractStore, PgContractStore};
//!
//! let config = DatabaseConfig::from_env();
//! let db = Database::connect(&config).await?;
//!
//! let store = PgContractStore::new(db.pool().clone());
//! let record = store.find_by_id(1).await?;
//! ```

pub mod contracts;
pub mod memory;
pub mod pool;
pub mod repository;
pub mod users;

pub use contracts::PgContractStore;
pub use memory::{MemoryContractStore, MemoryUserStore};
pub use pool::{Database, DatabaseConfig};
pub use repository::{ContractStore, NewUserRecord, RepositoryError, RepositoryResult, UserStore};
pub use users::PgUserStore;
