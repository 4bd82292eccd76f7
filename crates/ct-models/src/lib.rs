//! # ct-models
//!
//! Domain entities for ContractDesk RS: users, contract records, and the
//! validated request payloads that create or change them.

pub mod contract;
pub mod user;

pub use contract::{ContractRecord, ContractUpdate, NewContract};
pub use user::{Credentials, Signup, User};
