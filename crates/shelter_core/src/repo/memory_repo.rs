//! In-memory dog repository.
//!
//! # Responsibility
//! - Provide a process-local store with the same contract as SQLite.
//! - Simulate an unreachable store for failure-path callers.
//!
//! # Invariants
//! - Ids start at 1 and are never reused, matching `AUTOINCREMENT`.
//! - While offline, every operation fails with `DbError::Unavailable` and
//!   leaves stored records untouched.

use crate::db::DbError;
use crate::model::dog::{DogId, DogRecord, NewDog};
use crate::repo::dog_repo::{DogRepository, RepoError, RepoResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

const MEMORY_LOCATION: &str = "memory://dogs";

#[derive(Debug, Default)]
struct MemoryState {
    dogs: Vec<DogRecord>,
    last_id: DogId,
}

/// `Mutex`-guarded dog store kept entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryDogRepository {
    state: Mutex<MemoryState>,
    offline: AtomicBool,
}

impl InMemoryDogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `dogs`, assigning ids in order.
    pub fn with_dogs(dogs: impl IntoIterator<Item = NewDog>) -> Self {
        let repo = Self::new();
        {
            let mut state = repo.state();
            for dog in dogs {
                state.last_id += 1;
                let id = state.last_id;
                state.dogs.push(dog.into_record(id));
            }
        }
        repo
    }

    /// Toggles simulated connectivity loss.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.state().dogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn connect(&self) -> RepoResult<MutexGuard<'_, MemoryState>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepoError::Db(DbError::Unavailable {
                location: MEMORY_LOCATION.to_string(),
                reason: "store is offline".to_string(),
            }));
        }
        Ok(self.state())
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DogRepository for InMemoryDogRepository {
    fn list_dogs(&self) -> RepoResult<Vec<DogRecord>> {
        Ok(self.connect()?.dogs.clone())
    }

    fn insert_dog(&self, dog: &NewDog) -> RepoResult<()> {
        let mut state = self.connect()?;
        state.last_id += 1;
        let id = state.last_id;
        state.dogs.push(dog.clone().into_record(id));
        Ok(())
    }

    fn delete_dog(&self, id: DogId) -> RepoResult<()> {
        self.connect()?.dogs.retain(|dog| dog.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryDogRepository;
    use crate::model::dog::NewDog;
    use crate::repo::dog_repo::DogRepository;

    fn dog(name: &str) -> NewDog {
        NewDog {
            name: name.to_string(),
            race: "Kundel".to_string(),
            color: "Rudy".to_string(),
            photo: format!("{name}.jpg"),
            number: "1".to_string(),
            illnesses: "Brak".to_string(),
        }
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let repo = InMemoryDogRepository::with_dogs([dog("Azor"), dog("Burek")]);
        repo.delete_dog(2).unwrap();
        repo.insert_dog(&dog("Reksio")).unwrap();

        let ids: Vec<_> = repo.list_dogs().unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn offline_store_reports_unavailable_and_keeps_data() {
        let repo = InMemoryDogRepository::with_dogs([dog("Azor")]);
        repo.set_offline(true);

        assert!(repo.list_dogs().unwrap_err().is_unavailable());
        assert!(repo.insert_dog(&dog("Burek")).unwrap_err().is_unavailable());
        assert!(repo.delete_dog(1).unwrap_err().is_unavailable());

        repo.set_offline(false);
        assert_eq!(repo.len(), 1);
    }
}
