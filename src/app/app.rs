//! Bridge application: orchestrator client, invocation transport and HTTP server.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::{Config, ConfigTrait};
use crate::rancher::{BridgeClient, RancherClient};
use crate::upstream::{HttpDoer, HyperDoer};

use super::server::HttpServer;

/// Encapsulates the entire bridge application state.
#[derive(Clone)]
pub struct App {
    shutdown_token: CancellationToken,
    server: Arc<HttpServer>,
}

impl App {
    /// Resolves the function stack and assembles the HTTP server.
    /// Fails when the orchestrator cannot be reached or the stack does not exist.
    pub async fn new(shutdown_token: CancellationToken, cfg: Config) -> Result<Self> {
        let orchestrator = HyperDoer::new(cfg.rancher_timeout())
            .context("failed to build orchestrator transport")?;
        let client = RancherClient::connect(cfg.rancher(), Arc::new(orchestrator))
            .await
            .with_context(|| format!("failed to connect to orchestrator at {}", cfg.rancher().url))?;

        info!(
            component = "app",
            event = "orchestrator_connected",
            stack = cfg.stack_name(),
            stack_id = client.stack_id(),
            "orchestrator client ready"
        );

        let functions = HyperDoer::new(cfg.function_timeout())
            .context("failed to build invocation transport")?;

        Self::with_dependencies(
            shutdown_token,
            cfg,
            Arc::new(client) as Arc<dyn BridgeClient>,
            Arc::new(functions) as Arc<dyn HttpDoer>,
        )
    }

    /// Assembles the application over the given orchestrator client and invocation transport.
    pub fn with_dependencies(
        shutdown_token: CancellationToken,
        cfg: Config,
        client: Arc<dyn BridgeClient>,
        functions: Arc<dyn HttpDoer>,
    ) -> Result<Self> {
        let server = HttpServer::new(shutdown_token.clone(), cfg, client, functions)?;
        Ok(Self {
            shutdown_token,
            server: Arc::new(server),
        })
    }

    pub fn router(&self) -> axum::Router {
        self.server.router()
    }

    /// Serves until the shutdown token is cancelled, then releases `gsh`.
    pub async fn serve(&self, gsh: Arc<crate::shutdown::GracefulShutdown>) -> Result<()> {
        let app = self.clone();

        tokio::task::spawn(async move {
            if let Err(e) = app.server.listen_and_serve().await {
                error!(
                    component = "app",
                    scope = "server",
                    event = "serve_failed",
                    error = %e,
                    "server failed to serve"
                );
            }

            app.close();
            gsh.done();
        });

        info!(
            component = "app",
            event = "started",
            "application lifecycle"
        );

        Ok(())
    }

    /// Closes application resources.
    pub fn close(&self) {
        self.server.close();
        self.shutdown_token.cancel();

        info!(
            component = "app",
            event = "stopped",
            "application lifecycle"
        );
    }
}
