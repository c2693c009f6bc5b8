//! Non-success outcomes of the calculator and person operations.
//!
//! The core never talks in status codes. It returns a [`Rejection`]; the
//! `routes` module decides what each kind looks like on the wire.

use serde::{Deserialize, Serialize};

/// One entry of a validation error list.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldError {
    pub code: u16,
    pub message: String,
}

impl FieldError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// Why an operation did not produce a value.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Rejection {
    /// The caller sent something unusable; carries a human-readable message.
    #[error("{0}")]
    Invalid(String),

    /// Validation found one or more field problems.
    #[error("{} validation error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Something failed below the validation layer.
    #[error("{0}")]
    Internal(String),
}

impl Rejection {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

/// What every calculator and person operation returns.
pub type Outcome<T> = Result<T, Rejection>;
