//! The `Person` record and the service capability that stores it.

mod controller;
mod memory;

pub use controller::{Created, PersonController};
pub use memory::InMemoryPersonService;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

/// A person record as exchanged over HTTP (camelCase JSON).
///
/// Only `id` and `first_name` are inspected by the controller; the rest is
/// carried through to the service untouched. Absent and `null` text fields
/// both decode as empty strings.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub id: i64,
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub gender: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Failure reported by a [`PersonService`].
///
/// The display text is what callers see in a `500` body.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("person {0} does not exist")]
    NotFound(i64),

    #[error("person store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations for [`Person`] records.
///
/// Implementations own id assignment and durability; the controller only
/// validates and delegates.
#[async_trait]
pub trait PersonService: Send + Sync {
    /// Whether the store can answer at all. Defaults to a full listing;
    /// implementations with a cheaper probe should override it.
    async fn check(&self) -> Result<(), ServiceError> {
        self.find_all().await.map(drop)
    }

    async fn find_all(&self) -> Result<Vec<Person>, ServiceError>;

    /// `Ok(None)` when no person has `id`.
    async fn find_by_id(&self, id: i64) -> Result<Option<Person>, ServiceError>;

    async fn create(&self, person: Person) -> Result<Person, ServiceError>;

    async fn update(&self, person: Person) -> Result<Person, ServiceError>;

    /// Removing an unknown id is not an error.
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}
