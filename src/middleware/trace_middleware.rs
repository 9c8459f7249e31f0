//! Request tracing middleware.

use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Opens a span per request and logs every response at debug level.
pub struct TraceMiddleware;

impl TraceMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TraceMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::middleware::middleware::Middleware for TraceMiddleware {
    fn apply(&self, router: axum::Router) -> axum::Router {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
    }
}
