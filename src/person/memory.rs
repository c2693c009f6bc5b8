//! Process-local [`PersonService`] backed by a `BTreeMap`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::{Person, PersonService, ServiceError};

/// Keeps people in memory, ordered by id. Ids start at 1.
#[derive(Debug, Default)]
pub struct InMemoryPersonService {
    people: RwLock<BTreeMap<i64, Person>>,
    last_id: AtomicI64,
}

impl InMemoryPersonService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. Ids are kept as given; new ids continue after the
    /// largest one.
    pub fn with_people(people: impl IntoIterator<Item = Person>) -> Self {
        let people: BTreeMap<i64, Person> = people.into_iter().map(|p| (p.id, p)).collect();
        let last_id = people.keys().next_back().copied().unwrap_or(0).max(0);
        Self { people: RwLock::new(people), last_id: AtomicI64::new(last_id) }
    }

    pub fn len(&self) -> usize {
        self.people.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.read().is_empty()
    }
}

#[async_trait]
impl PersonService for InMemoryPersonService {
    async fn find_all(&self) -> Result<Vec<Person>, ServiceError> {
        Ok(self.people.read().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Person>, ServiceError> {
        Ok(self.people.read().get(&id).cloned())
    }

    async fn check(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn create(&self, mut person: Person) -> Result<Person, ServiceError> {
        let last = self
            .last_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .map_err(|_| ServiceError::Unavailable("id sequence exhausted".into()))?;
        person.id = last + 1;
        debug!(id = person.id, "person stored");
        self.people.write().insert(person.id, person.clone());
        Ok(person)
    }

    async fn update(&self, person: Person) -> Result<Person, ServiceError> {
        let mut people = self.people.write();
        match people.get_mut(&person.id) {
            Some(slot) => {
                *slot = person.clone();
                Ok(person)
            }
            None => Err(ServiceError::NotFound(person.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.people.write().remove(&id).is_some() {
            debug!(id, "person removed");
        }
        Ok(())
    }
}
