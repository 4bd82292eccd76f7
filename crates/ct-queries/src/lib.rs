//! # ct-queries
//!
//! The query layer for ContractDesk RS.
//!
//! - `scope` - the visible-record rule (all records for admins, own records otherwise)
//! - `filters` - user-supplied filter parameters applied on top of a scope
//! - `columns` - role-dependent export column sets

pub mod columns;
pub mod filters;
pub mod scope;

pub use columns::{export_columns, EXPORT_COLUMNS, OWNER_COLUMN};
pub use filters::ContractFilter;
pub use scope::RecordScope;
