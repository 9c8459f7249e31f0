//! HTTP server implementation.

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};

use crate::config::{Config, ConfigTrait};
use crate::controller::controller::Controller;
use crate::middleware::middleware::Middleware;

/// Slack that keeps the inbound deadline behind the function transport's.
const INBOUND_TIMEOUT_MARGIN: Duration = Duration::from_secs(1);

/// HTTP server implementation.
pub struct HttpServer {
    shutdown_token: CancellationToken,
    config: Config,
    router: Router,
}

impl HttpServer {
    /// Creates a new HTTP server.
    pub fn new(
        shutdown_token: CancellationToken,
        config: Config,
        controllers: Vec<Box<dyn Controller>>,
        middlewares: Vec<Box<dyn Middleware>>,
    ) -> Result<Arc<Self>> {
        let router = Self::build_router(controllers);
        let router = Self::merge_middlewares(router, middlewares, inbound_timeout(&config));

        Ok(Arc::new(Self {
            shutdown_token,
            config,
            router,
        }))
    }

    /// Router with every route and middleware applied.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Starts the HTTP server (async version).
    pub async fn listen_and_serve(&self) -> Result<()> {
        let name = self.config.name();
        let port = self.config.port().trim_start_matches(':');

        let addr: SocketAddr = format!("0.0.0.0:{}", port)
            .parse()
            .context("Failed to parse server address")?;

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind TCP listener on {}", addr))?;

        info!(
            component = "server",
            event = "started",
            name = name,
            port = port,
            "server started"
        );

        let shutdown_token = self.shutdown_token.clone();
        let serve_future =
            axum::serve(listener, self.router.clone()).with_graceful_shutdown(async move {
                shutdown_token.cancelled().await;
            });

        if let Err(e) = serve_future.await {
            error!(
                component = "server",
                event = "listen_and_serve_failed",
                name = name,
                port = port,
                error = %e,
                "server failed to listen and serve"
            );
            return Err(e.into());
        }

        info!(
            component = "server",
            event = "stopped",
            name = name,
            port = port,
            "server stopped"
        );

        Ok(())
    }

    /// Builds the router with all controllers.
    pub fn build_router(controllers: Vec<Box<dyn Controller>>) -> Router {
        let mut router = Router::new();

        for controller in controllers {
            router = controller.add_route(router);
        }

        router
    }

    /// Merges middlewares into the router.
    fn merge_middlewares(
        router: Router,
        middlewares: Vec<Box<dyn Middleware>>,
        request_timeout: Duration,
    ) -> Router {
        let mut result = router;

        // Apply middlewares in reverse order (last middleware wraps first)
        for middleware in middlewares.iter().rev() {
            result = middleware.apply(result);
        }

        result.layer(TimeoutLayer::new(request_timeout))
    }
}

/// Deadline for a whole inbound request. Never shorter than a function call
/// plus margin, so a slow function surfaces as a transport timeout.
pub fn inbound_timeout(cfg: &Config) -> Duration {
    cfg.request_timeout()
        .max(cfg.function_timeout() + INBOUND_TIMEOUT_MARGIN)
}
