//! Main entrypoint for the faas-rancher bridge.

use faas_rancher::app;
use faas_rancher::config::{Config, ConfigTrait};
use faas_rancher::controller::metrics as prometheus;
use faas_rancher::shutdown::GracefulShutdown;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const CONFIG_PATH: &str = "cfg/faas-rancher.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/faas-rancher.cfg.local.yaml";

const GRACEFUL_TIMEOUT: Duration = Duration::from_secs(30);

/// faas-rancher - runs platform functions as Rancher services
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,
}

/// Loads the configuration struct from YAML file.
/// Tries local config first, then the default config, then built-in defaults.
/// Environment overrides are applied on top in every case.
fn load_cfg(path: Option<PathBuf>) -> Result<(Config, String)> {
    let (mut cfg, source) = match path {
        Some(custom_path) => {
            let cfg = Config::load(&custom_path)
                .with_context(|| format!("failed to load custom config from {:?}", custom_path))?;
            (cfg, custom_path.display().to_string())
        }
        None if Path::new(CONFIG_PATH_LOCAL).exists() => {
            (Config::load(CONFIG_PATH_LOCAL)?, CONFIG_PATH_LOCAL.to_string())
        }
        None if Path::new(CONFIG_PATH).exists() => {
            (Config::load(CONFIG_PATH)?, CONFIG_PATH.to_string())
        }
        None => (Config::default(), "defaults".to_string()),
    };

    cfg.apply_env();
    cfg.validate().context("invalid configuration")?;

    Ok((cfg, source))
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_ref())
        .map(|s| s.as_str())
        .unwrap_or("info");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The logger depends on the config, so config errors go to stderr
    let (cfg, source) = load_cfg(args.cfg)?;
    configure_logger(&cfg);

    info!(
        component = "config",
        event = "load_success",
        path = %source,
        "config loaded"
    );

    tokio::runtime::Runtime::new()
        .context("Failed to create tokio runtime")?
        .block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<()> {
    // Create cancellation token for graceful shutdown
    let shutdown_token = CancellationToken::new();

    if cfg.is_metrics_enabled() {
        match prometheus::init_prometheus_exporter() {
            Ok(handle) => prometheus::spawn_upkeep(handle, shutdown_token.clone()),
            Err(e) => warn!(
                component = "main",
                event = "metrics_init_failed",
                error = %e,
                "metrics endpoint will render nothing"
            ),
        }
    }

    // Setup graceful shutdown handler
    let graceful_shutdown = GracefulShutdown::new(shutdown_token.clone());
    graceful_shutdown.set_graceful_timeout(GRACEFUL_TIMEOUT).await;

    // Resolves the function stack; an unknown stack stops the process here
    let app = app::App::new(shutdown_token.clone(), cfg).await?;

    // Register app for graceful shutdown
    graceful_shutdown.add(1);
    app.serve(Arc::new(graceful_shutdown.clone())).await?;

    // Listen for OS signals or cancellation and wait for graceful shutdown
    if let Err(e) = graceful_shutdown.await_shutdown().await {
        error!(
            component = "main",
            scope = "service",
            event = "graceful_shutdown_failed",
            error = %e,
            "failed to gracefully shut down service"
        );
        return Err(e);
    }

    Ok(())
}
