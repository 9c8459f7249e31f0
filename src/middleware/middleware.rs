//! Middleware interface.

use axum::Router;

/// Middleware wraps every route of the router it is applied to.
pub trait Middleware: Send + Sync {
    /// Applies the middleware to the router.
    fn apply(&self, router: Router) -> Router;
}
