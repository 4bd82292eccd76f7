//! API handlers

pub mod auth;
pub mod contracts;
pub mod export;
