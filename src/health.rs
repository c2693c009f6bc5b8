//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the person store answer? Failure → pulled from load-balancer. |

use crate::person::PersonController;
use crate::{Request, Response, Status};

/// Liveness probe handler.
///
/// Always returns `200 OK` with body `"ok"`. If the process can respond to
/// HTTP at all, it is alive.
pub async fn liveness<S>(_req: Request, _state: S) -> Response {
    Response::text("ok")
}

/// Readiness probe handler.
///
/// Returns `200 OK` with body `"ready"` once the person service passes its
/// check, `503 Service Unavailable` otherwise. The failure itself is logged
/// by the controller.
pub async fn readiness(_req: Request, people: PersonController) -> Response {
    match people.ready().await {
        Ok(()) => Response::text("ready"),
        Err(_) => Response::builder().status(Status::ServiceUnavailable).text("not ready"),
    }
}
