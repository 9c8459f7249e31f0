//! HTTP controller trait for route registration.

use axum::Router;

/// Trait for adding routes to the HTTP server.
pub trait Controller: Send + Sync {
    /// Adds routes to the router.
    ///
    /// Controllers registering different methods on one path are merged:
    /// ```rust
    /// # use axum::{Router, routing::{get, post}};
    /// # async fn list() -> &'static str { "[]" }
    /// # async fn deploy() -> &'static str { "" }
    /// let router: Router<()> = Router::new()
    ///     .route("/system/functions", get(list))
    ///     .route("/system/functions", post(deploy));
    /// # let _ = router;
    /// ```
    fn add_route(&self, router: Router) -> Router;
}
