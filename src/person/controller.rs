//! Validate-then-delegate flow for person requests.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::{Person, PersonService, ServiceError};
use crate::rejection::{FieldError, Outcome, Rejection};

pub const NOT_FOUND: &str = "Ooops! Nenhuma pessoa encontrada...";
pub const CREATE_WITHOUT_BODY: &str = "Ooops! Nenhum dado foi informado para cadastro...";
pub const FIRST_NAME_REQUIRED: &str = "O primeiro nome deve ser informado para cadastro!";
pub const CREATED: &str = "Pessoa cadastrada com sucesso!";
pub const UPDATE_WITHOUT_BODY: &str =
    "Ooops! Ao menos algum dado deve ser informado para a atualização.";
pub const UPDATE_WITHOUT_ID: &str = "Ooops! É preciso informar o id da pessoa para atualização...";
pub const DELETE_WITHOUT_ID: &str =
    "Ooops! É necessário informado o identificador para exclusão...";

/// A freshly stored person plus the confirmation shown to the caller.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Created {
    pub message: &'static str,
    #[serde(rename = "data")]
    pub person: Person,
}

/// Checks person requests and hands them to a [`PersonService`].
///
/// Holds no per-request state, so one instance is shared by every request.
#[derive(Clone)]
pub struct PersonController {
    service: Arc<dyn PersonService>,
}

impl PersonController {
    pub fn new(service: Arc<dyn PersonService>) -> Self {
        Self { service }
    }

    /// Asks the service whether it can serve requests.
    pub async fn ready(&self) -> Outcome<()> {
        self.service.check().await.map_err(internal)
    }

    pub async fn list(&self) -> Outcome<Vec<Person>> {
        self.service.find_all().await.map_err(internal)
    }

    /// A missing person is reported as [`Rejection::Invalid`].
    pub async fn get(&self, id: i64) -> Outcome<Person> {
        match self.service.find_by_id(id).await.map_err(internal)? {
            Some(person) => Ok(person),
            None => {
                debug!(id, "person not found");
                Err(Rejection::invalid(NOT_FOUND))
            }
        }
    }

    pub async fn create(&self, person: Option<Person>) -> Outcome<Created> {
        let Some(person) = person else {
            return Err(Rejection::invalid(CREATE_WITHOUT_BODY));
        };

        let mut errors = Vec::new();
        if person.first_name.is_empty() {
            errors.push(FieldError::new(400, FIRST_NAME_REQUIRED));
        }
        if !errors.is_empty() {
            return Err(Rejection::Validation(errors));
        }

        let person = self.service.create(person).await.map_err(internal)?;
        Ok(Created { message: CREATED, person })
    }

    pub async fn update(&self, person: Option<Person>) -> Outcome<Person> {
        let Some(person) = person else {
            return Err(Rejection::invalid(UPDATE_WITHOUT_BODY));
        };
        if person.id <= 0 {
            return Err(Rejection::invalid(UPDATE_WITHOUT_ID));
        }
        self.service.update(person).await.map_err(internal)
    }

    /// Delegates every non-zero id, whether or not it exists.
    pub async fn delete(&self, id: i64) -> Outcome<String> {
        if id == 0 {
            return Err(Rejection::invalid(DELETE_WITHOUT_ID));
        }
        self.service.delete(id).await.map_err(internal)?;
        Ok(format!("Pessoa de identificador {id} excluída com sucesso!"))
    }
}

fn internal(err: ServiceError) -> Rejection {
    warn!(error = %err, "person service failed");
    Rejection::internal(err)
}
