//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Handlers receive a clone
//! of the router's state alongside the request.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use matchit::Router as MatchitRouter;
use tracing::{Instrument, debug, info_span};

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router<S = ()> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

impl Router<()> {
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl Default for Router<()> {
    fn default() -> Self { Self::new() }
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// A router whose handlers all receive a clone of `state`.
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`:
    ///
    /// ```rust,no_run
    /// # use newrest::{Method, Request, Response, Router};
    /// # async fn sum(_: Request, _: ()) -> Response { Response::text("") }
    /// # async fn sqrt(_: Request, _: ()) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get, "/calculator/sum/{a}/{b}", sum)
    ///     .on(Method::Get, "/calculator/sqrt/{n}",    sqrt);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics on a malformed or conflicting route, which is a programming
    /// error caught at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Routes one buffered request and produces one response.
    ///
    /// Unknown paths answer `404`; a path registered only under other methods
    /// answers `405`.
    pub async fn call(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();
        let span = info_span!("request", method = %parts.method, path = %parts.uri.path());

        async move {
            let started = Instant::now();
            let path = parts.uri.path().to_owned();

            let response = match Method::try_from(&parts.method)
                .ok()
                .and_then(|m| self.lookup(m, &path))
            {
                Some((handler, params)) => {
                    handler.call(Request::new(body, params), self.state.clone()).await
                }
                None if self.matches_any(&path) => Response::status(Status::MethodNotAllowed),
                None => Response::status(Status::NotFound),
            };

            debug!(
                status = response.status_code().as_u16(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "request finished"
            );
            response
        }
        .instrument(span)
        .await
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), decode(v)))
            .collect();
        Some((handler, params))
    }

    fn matches_any(&self, path: &str) -> bool {
        self.routes.values().any(|tree| tree.at(path).is_ok())
    }
}

/// Percent-decodes a path segment; a segment that does not decode to UTF-8
/// is handed over raw.
fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_owned())
}
