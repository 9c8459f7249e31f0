//! HTTP server of the bridge: controllers and middlewares over shared dependencies.

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, ConfigTrait};
use crate::http::{Controller, Middleware};
use crate::rancher::BridgeClient;
use crate::upstream::HttpDoer;

/// HTTP server implementation that wraps all dependencies.
pub struct HttpServer {
    ctx: CancellationToken,
    server: Arc<crate::http::HttpServer>,
}

impl HttpServer {
    /// Creates a new HttpServer with all controllers and middlewares.
    pub fn new(
        ctx: CancellationToken,
        cfg: Config,
        client: Arc<dyn BridgeClient>,
        functions: Arc<dyn HttpDoer>,
    ) -> Result<Self> {
        let controllers = Self::controllers(&cfg, client, functions);
        let middlewares = Self::middlewares();
        let server = crate::http::HttpServer::new(ctx.clone(), cfg, controllers, middlewares)?;

        Ok(Self { ctx, server })
    }

    pub fn router(&self) -> Router {
        self.server.router()
    }

    /// Starts the HTTP server (blocking call).
    pub async fn listen_and_serve(&self) -> Result<()> {
        self.server.listen_and_serve().await
    }

    /// Stops accepting requests.
    pub fn close(&self) {
        self.ctx.cancel();
    }

    /// Returns all HTTP controllers for the server.
    fn controllers(
        cfg: &Config,
        client: Arc<dyn BridgeClient>,
        functions: Arc<dyn HttpDoer>,
    ) -> Vec<Box<dyn Controller>> {
        use crate::controller;

        let mut controllers: Vec<Box<dyn Controller>> = vec![
            // Liveness endpoint
            Box::new(controller::LivenessProbeController::new()),
            // GET /system/functions
            Box::new(controller::FunctionReaderController::new(client.clone())),
            // POST /system/functions
            Box::new(controller::DeployController::new(client.clone())),
            // DELETE /system/functions
            Box::new(controller::DeleteController::new(client.clone())),
            // GET /system/function/{name}
            Box::new(controller::ReplicaReaderController::new(client.clone())),
            // POST /system/scale-function/{name}
            Box::new(controller::ReplicaUpdaterController::new(client)),
            // ANY /function/{name}
            Box::new(controller::InvokeController::new(
                functions,
                cfg.stack_name(),
                cfg.watchdog_port(),
            )),
        ];

        if cfg.is_metrics_enabled() {
            controllers.push(Box::new(controller::PrometheusMetricsController::new()));
        }

        controllers
    }

    /// Returns the request middlewares for the server, executed in reverse order.
    fn middlewares() -> Vec<Box<dyn Middleware>> {
        vec![
            // Exec first - request span
            Box::new(crate::middleware::trace_middleware::TraceMiddleware::new()),
            // Exec second - panic recovery
            Box::new(crate::middleware::recover_middleware::PanicRecoverMiddleware::new()),
        ]
    }
}
