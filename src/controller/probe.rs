//! Liveness endpoint.

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::http::Controller;

pub const HEALTHZ_PATH: &str = "/healthz";

const SUCCESS_RESPONSE: &str = r#"{
  "status": 200,
  "message": "I'm fine :D"
}"#;

/// LivenessProbeController answers `GET /healthz` while the process serves requests.
/// Orchestrator reachability is not checked here.
pub struct LivenessProbeController;

impl LivenessProbeController {
    pub fn new() -> Self {
        Self
    }

    async fn probe() -> impl IntoResponse {
        (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/json")],
            SUCCESS_RESPONSE,
        )
    }
}

impl Default for LivenessProbeController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for LivenessProbeController {
    fn add_route(&self, router: Router) -> Router {
        router.route(HEALTHZ_PATH, get(Self::probe))
    }
}
