//! HTTP status codes as a typed enum.
//!
//! Only the codes this service actually answers with are listed. Anything
//! else can still be expressed through [`http::StatusCode`] directly.
//!
//! ```rust
//! use newrest::{Response, Status};
//!
//! Response::status(Status::NotFound);
//!
//! Response::builder()
//!     .status(Status::Created)
//!     .header("location", "/person/pessoa/42")
//!     .json(br#"{"id":42}"#.to_vec());
//! ```

use http::StatusCode;

/// Status codes produced by the router and the controllers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200
    Created,             // 201
    NoContent,           // 204

    // ── 4xx Client Error ──────────────────────────────────────────────────────
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405
    PayloadTooLarge,     // 413

    // ── 5xx Server Error ──────────────────────────────────────────────────────
    InternalServerError, // 500
    ServiceUnavailable,  // 503
}

impl Status {
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Ok                  => 200,
            Self::Created             => 201,
            Self::NoContent           => 204,
            Self::BadRequest          => 400,
            Self::NotFound            => 404,
            Self::MethodNotAllowed    => 405,
            Self::PayloadTooLarge     => 413,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable  => 503,
        }
    }
}

impl From<Status> for StatusCode {
    fn from(s: Status) -> Self {
        match s {
            Status::Ok                  => StatusCode::OK,
            Status::Created             => StatusCode::CREATED,
            Status::NoContent           => StatusCode::NO_CONTENT,
            Status::BadRequest          => StatusCode::BAD_REQUEST,
            Status::NotFound            => StatusCode::NOT_FOUND,
            Status::MethodNotAllowed    => StatusCode::METHOD_NOT_ALLOWED,
            Status::PayloadTooLarge     => StatusCode::PAYLOAD_TOO_LARGE,
            Status::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Status::ServiceUnavailable  => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 { s.as_u16() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_code_matches_http_crate() {
        for s in [
            Status::Ok,
            Status::Created,
            Status::NoContent,
            Status::BadRequest,
            Status::NotFound,
            Status::MethodNotAllowed,
            Status::PayloadTooLarge,
            Status::InternalServerError,
            Status::ServiceUnavailable,
        ] {
            assert_eq!(StatusCode::from(s).as_u16(), s.as_u16());
        }
    }
}
