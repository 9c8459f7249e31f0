//! Metrics controller.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::http::Controller;

pub const PROMETHEUS_METRICS_PATH: &str = "/metrics";

const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder as the global `metrics` recorder.
/// Calling it twice is an error.
pub fn init_prometheus_exporter() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    PROMETHEUS_HANDLE
        .set(handle.clone())
        .map_err(|_| anyhow::anyhow!("Prometheus handle already initialized"))?;

    Ok(handle)
}

/// Drains histogram buckets periodically until `shutdown_token` is cancelled.
pub fn spawn_upkeep(handle: PrometheusHandle, shutdown_token: CancellationToken) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            tokio::select! {
                _ = shutdown_token.cancelled() => return,
                _ = ticker.tick() => handle.run_upkeep(),
            }
        }
    });
}

/// PrometheusMetricsController handles Prometheus metrics endpoint.
pub struct PrometheusMetricsController;

impl PrometheusMetricsController {
    /// Creates a new Prometheus metrics controller.
    pub fn new() -> Self {
        Self
    }

    async fn get_metrics() -> impl IntoResponse {
        let body = PROMETHEUS_HANDLE
            .get()
            .map(PrometheusHandle::render)
            .unwrap_or_default();

        (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
    }
}

impl Default for PrometheusMetricsController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for PrometheusMetricsController {
    fn add_route(&self, router: Router) -> Router {
        router.route(PROMETHEUS_METRICS_PATH, get(Self::get_metrics))
    }
}
