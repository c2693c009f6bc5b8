//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

/// What a handler sees of a request: its decoded path parameters and the
/// fully buffered body.
pub struct Request {
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(body: Bytes, params: HashMap<String, String>) -> Self {
        Self { body, params }
    }

    /// Returns a named path parameter, percent-decoded.
    ///
    /// For a route `/person/pessoa/{id}`, `req.param("id")` on
    /// `/person/pessoa/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Decodes the body as JSON.
    ///
    /// An empty body and a literal `null` both yield `Ok(None)`, so callers
    /// can tell "nothing was sent" apart from "something unreadable was sent".
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&self.body)
    }
}
