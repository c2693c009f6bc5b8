//! # newrest
//!
//! Two small HTTP controllers on a minimal hyper router.
//!
//! - **Calculator** — `sum`, `minus`, `division`, `multiplication`, `sqrt`
//!   and `medium` over numeric path tokens, answered as plain text.
//! - **Person** — list, get, create, update and delete `Person` records,
//!   delegated to an injected [`PersonService`].
//!
//! ## Layout
//!
//! - [`numeric`] and [`calculator`] — token validation and the arithmetic.
//! - [`person`] — the record, the service trait, an in-memory service and
//!   the [`PersonController`] that validates before delegating.
//! - [`routes`] — the path table and the mapping from [`Rejection`] to
//!   status codes. Nothing else knows about HTTP statuses.
//! - [`Router`], [`Server`] — radix-tree routing via [`matchit`] and a hyper
//!   server with graceful shutdown on SIGTERM / Ctrl-C.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use newrest::{InMemoryPersonService, Server, routes};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = routes::app(Arc::new(InMemoryPersonService::new()));
//!     Server::bind("0.0.0.0:3000".parse().unwrap()).serve(app).await.unwrap();
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod calculator;
pub mod config;
pub mod health;
pub mod numeric;
pub mod person;
pub mod rejection;
pub mod routes;
pub mod telemetry;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use person::{InMemoryPersonService, Person, PersonController, PersonService, ServiceError};
pub use rejection::{FieldError, Outcome, Rejection};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
