//! The HTTP surface: path table plus thin handlers.
//!
//! Handlers only pull tokens out of the request, call the calculator or the
//! [`PersonController`], and map the outcome onto a response. A
//! [`Rejection`] becomes:
//!
//! | Rejection | Status | Body |
//! |---|---|---|
//! | `Invalid(msg)` | 400 | text |
//! | `Validation(list)` | 400 | JSON array of `{code, message}` |
//! | `Internal(msg)` | 500 | text |

use std::sync::Arc;

use crate::calculator;
use crate::health;
use crate::person::{Person, PersonController, PersonService};
use crate::rejection::{Outcome, Rejection};
use crate::{IntoResponse, Method, Request, Response, Router, Status};

/// Builds the full application router around `service`.
pub fn app(service: Arc<dyn PersonService>) -> Router<PersonController> {
    Router::with_state(PersonController::new(service))
        .on(Method::Get,    "/calculator/sum/{a}/{b}",            sum)
        .on(Method::Get,    "/calculator/minus/{a}/{b}",          minus)
        .on(Method::Get,    "/calculator/division/{a}/{b}",       division)
        .on(Method::Get,    "/calculator/multiplication/{a}/{b}", multiplication)
        .on(Method::Get,    "/calculator/sqrt/{n}",               sqrt)
        .on(Method::Get,    "/calculator/medium/{a}/{b}",         medium)
        .on(Method::Get,    "/person/pessoa",                     list_people)
        .on(Method::Get,    "/person/pessoa/{id}",                get_person)
        .on(Method::Post,   "/person/pessoa/cadastrar",           create_person)
        .on(Method::Put,    "/person/pessoa/atualizar",           update_person)
        .on(Method::Delete, "/person/pessoa/deletar/{id}",        delete_person)
        .on(Method::Get,    "/healthz",                           health::liveness::<PersonController>)
        .on(Method::Get,    "/readyz",                            health::readiness)
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(msg) => Response::builder().status(Status::BadRequest).text(msg),
            Self::Validation(errors) => {
                Response::builder().status(Status::BadRequest).serialize(&errors)
            }
            Self::Internal(msg) => {
                Response::builder().status(Status::InternalServerError).text(msg)
            }
        }
    }
}

// ── Calculator ────────────────────────────────────────────────────────────────

fn operands(req: &Request) -> (&str, &str) {
    (req.param("a").unwrap_or_default(), req.param("b").unwrap_or_default())
}

async fn sum(req: Request, _: PersonController) -> Outcome<String> {
    let (a, b) = operands(&req);
    calculator::sum(a, b)
}

async fn minus(req: Request, _: PersonController) -> Outcome<String> {
    let (a, b) = operands(&req);
    calculator::minus(a, b)
}

async fn division(req: Request, _: PersonController) -> Outcome<String> {
    let (a, b) = operands(&req);
    calculator::division(a, b)
}

async fn multiplication(req: Request, _: PersonController) -> Outcome<String> {
    let (a, b) = operands(&req);
    calculator::multiplication(a, b)
}

async fn sqrt(req: Request, _: PersonController) -> Outcome<String> {
    calculator::sqrt(req.param("n").unwrap_or_default())
}

async fn medium(req: Request, _: PersonController) -> Outcome<String> {
    let (a, b) = operands(&req);
    calculator::medium(a, b)
}

// ── Person ────────────────────────────────────────────────────────────────────

fn id_param(req: &Request) -> Outcome<i64> {
    let raw = req.param("id").unwrap_or_default();
    raw.trim()
        .parse()
        .map_err(|_| Rejection::invalid(format!("The value '{raw}' is not valid.")))
}

fn person_body(req: &Request) -> Outcome<Option<Person>> {
    req.json().map_err(|e| Rejection::invalid(e.to_string()))
}

async fn list_people(_req: Request, people: PersonController) -> Outcome<Response> {
    let all = people.list().await?;
    Ok(Response::builder().serialize(&all))
}

async fn get_person(req: Request, people: PersonController) -> Outcome<Response> {
    let person = people.get(id_param(&req)?).await?;
    Ok(Response::builder().serialize(&person))
}

async fn create_person(req: Request, people: PersonController) -> Outcome<Response> {
    let created = people.create(person_body(&req)?).await?;
    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &format!("/person/pessoa/{}", created.person.id))
        .serialize(&created))
}

async fn update_person(req: Request, people: PersonController) -> Outcome<Response> {
    let person = people.update(person_body(&req)?).await?;
    Ok(Response::builder().serialize(&person))
}

async fn delete_person(req: Request, people: PersonController) -> Outcome<String> {
    people.delete(id_param(&req)?).await
}
