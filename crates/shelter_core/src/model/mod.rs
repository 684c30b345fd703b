//! Shelter domain model.
//!
//! # Responsibility
//! - Define the dog record shapes shared by persistence and the HTTP layer.
//!
//! # Invariants
//! - Every stored record is identified by a store-assigned `DogId`.
//! - Records are hard-deleted; there is no tombstone state.

pub mod dog;
