//! Core traits shared by the domain entities

/// Primary key type
pub type Id = i64;

/// Trait for entities owned by a single user
pub trait Owned {
    fn owner_id(&self) -> Id;
}
