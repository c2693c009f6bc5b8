//! Unified infrastructure error type.

/// The error type returned by newrest's fallible startup operations.
///
/// Application-level failures (400, 500 answers to a request) are expressed as
/// [`Rejection`](crate::Rejection) values and mapped to responses, never as
/// `Error`s. This type surfaces infrastructure failures: reading the
/// configuration, binding to a port, accepting a connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),
}
