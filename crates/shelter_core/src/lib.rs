//! Core domain logic for the shelter records service.
//! This crate owns the dog record model, persistence and use-case rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::dog::{DogId, DogRecord, DogValidationError, NewDog, DOG_COLUMNS};
pub use repo::dog_repo::{
    DogRepository, RepoError, RepoResult, SqliteDogRepository, SqliteDogStore,
};
pub use repo::memory_repo::InMemoryDogRepository;
pub use service::dog_service::{ServiceError, ServiceResult, ShelterService};

/// Minimal health-check API for linkage probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
