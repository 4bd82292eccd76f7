//! # ct-core
//!
//! Core types, traits, and utilities for ContractDesk RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Field-keyed validation errors
//! - The `Id` primary-key type and the `Owned` trait
//! - Configuration types

pub mod config;
pub mod error;
pub mod traits;

pub use config::*;
pub use error::*;
pub use traits::*;
