//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract used by the service layer.
//! - Isolate SQLite query details from use-case orchestration.
//! - Provide an in-memory store for callers that must not touch disk.
//!
//! # Invariants
//! - "No connection" is reported as `RepoError::Db(DbError::Unavailable)`,
//!   never folded into an empty result.
//! - Deleting a missing id is a successful no-op.

pub mod dog_repo;
pub mod memory_repo;
