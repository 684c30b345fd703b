//! Shelter use-case service.
//!
//! # Responsibility
//! - Provide list/register/remove entry points for dog records.
//! - Validate payloads before they reach the repository.
//! - Classify failures into unavailable / invalid / internal.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - A store that cannot be reached always surfaces as
//!   `ServiceError::Unavailable`.

use crate::model::dog::{DogId, DogRecord, DogValidationError, NewDog};
use crate::repo::dog_repo::{DogRepository, RepoError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for shelter use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Payload rejected before any write.
    Validation(DogValidationError),
    /// The record store could not be reached.
    Unavailable(RepoError),
    /// Any other persistence failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unavailable(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Unavailable(err) | Self::Repo(err) => Some(err),
        }
    }
}

impl From<DogValidationError> for ServiceError {
    fn from(value: DogValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        if value.is_unavailable() {
            Self::Unavailable(value)
        } else {
            Self::Repo(value)
        }
    }
}

impl ServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid_payload",
            Self::Unavailable(_) => "db_unavailable",
            Self::Repo(_) => "db_error",
        }
    }
}

/// Use-case service wrapper for dog record operations.
pub struct ShelterService<R: DogRepository> {
    repo: R,
}

impl<R: DogRepository> ShelterService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists every stored dog ordered by id.
    pub fn list_dogs(&self) -> ServiceResult<Vec<DogRecord>> {
        let started_at = Instant::now();
        let result = self.repo.list_dogs().map_err(ServiceError::from);
        match &result {
            Ok(dogs) => info!(
                "event=dog_list module=service status=ok count={} duration_ms={}",
                dogs.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("dog_list", err),
        }
        result
    }

    /// Validates and stores a new dog.
    ///
    /// # Contract
    /// - Blank required fields fail with `ServiceError::Validation` and
    ///   nothing is written.
    /// - The assigned id is not returned; callers list to discover it.
    pub fn register_dog(&self, dog: &NewDog) -> ServiceResult<()> {
        let started_at = Instant::now();
        if let Err(err) = dog.validate() {
            let err = ServiceError::from(err);
            log_failure("dog_insert", &err);
            return Err(err);
        }

        let result = self.repo.insert_dog(dog).map_err(ServiceError::from);
        match &result {
            Ok(()) => info!(
                "event=dog_insert module=service status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("dog_insert", err),
        }
        result
    }

    /// Removes a dog by id. Unknown ids succeed without effect.
    pub fn remove_dog(&self, id: DogId) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_dog(id).map_err(ServiceError::from);
        match &result {
            Ok(()) => info!(
                "event=dog_delete module=service status=ok id={} duration_ms={}",
                id,
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("dog_delete", err),
        }
        result
    }
}

fn log_failure(event: &str, err: &ServiceError) {
    match err {
        ServiceError::Validation(_) => warn!(
            "event={event} module=service status=error error_code={} error={err}",
            err.code()
        ),
        ServiceError::Unavailable(_) | ServiceError::Repo(_) => error!(
            "event={event} module=service status=error error_code={} error={err}",
            err.code()
        ),
    }
}
