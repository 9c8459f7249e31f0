//! Panic recovery middleware.
//

use axum::{
    body::Body,
    http::{Response, StatusCode},
};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

/// Global panic counter.
static PANICS_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Gets the current panic counter value.
pub fn panics_counter() -> u64 {
    PANICS_COUNTER.load(Ordering::Relaxed)
}

/// Increments the panic counter.
pub fn inc_panics() {
    PANICS_COUNTER.fetch_add(1, Ordering::Relaxed);
    crate::metrics::add_panics(1);
}

/// Turns a handler panic into a plain 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    inc_panics();

    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(
        component = "middleware",
        event = "panic_recovered",
        panic = %details,
        "recovered from handler panic"
    );

    let mut resp = Response::new(Body::from("Internal Server Error"));
    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    resp
}

/// PanicRecoverMiddleware recovers from panics in HTTP handlers.
pub struct PanicRecoverMiddleware;

impl PanicRecoverMiddleware {
    /// Creates a new panic recovery middleware.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PanicRecoverMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

// Implementation of Middleware trait
impl crate::middleware::middleware::Middleware for PanicRecoverMiddleware {
    fn apply(&self, router: axum::Router) -> axum::Router {
        router.layer(CatchPanicLayer::custom(handle_panic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::middleware::Middleware;
    use axum::{http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_panic_becomes_500() {
        let router = Router::new().route("/boom", get(boom));
        let router = PanicRecoverMiddleware::new().apply(router);
        let before = panics_counter();

        let resp = router
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(panics_counter() > before);
    }
}
