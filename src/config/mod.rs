//! Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const PROD: &str = "prod";
pub const DEV: &str = "dev";
pub const TEST: &str = "test";

/// Environment variables that override the file configuration.
pub const ENV_CATTLE_URL: &str = "CATTLE_URL";
pub const ENV_CATTLE_ACCESS_KEY: &str = "CATTLE_ACCESS_KEY";
pub const ENV_CATTLE_SECRET_KEY: &str = "CATTLE_SECRET_KEY";
pub const ENV_FUNCTION_STACK_NAME: &str = "FUNCTION_STACK_NAME";

const DEFAULT_NAME: &str = "faas-rancher";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
const DEFAULT_RANCHER_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_FUNCTION_TIMEOUT: Duration = Duration::from_secs(8);

fn default_env() -> String {
    DEV.to_string()
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Bridge {
    #[serde(rename = "bridge")]
    pub bridge: BridgeBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeBox {
    #[serde(default = "default_env")]
    pub env: String,
    pub logs: Option<Logs>,
    pub api: Option<Api>,
    #[serde(default)]
    pub rancher: Rancher,
    pub functions: Option<Functions>,
    pub metrics: Option<Metrics>,
}

impl Default for BridgeBox {
    fn default() -> Self {
        Self {
            env: default_env(),
            logs: None,
            api: None,
            rancher: Rancher::default(),
            functions: None,
            metrics: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Api {
    pub name: Option<String>,
    pub port: Option<String>,
    #[serde(rename = "request_timeout", default, with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
}

/// Orchestrator connection settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Rancher {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "access_key", default)]
    pub access_key: String,
    #[serde(rename = "secret_key", default)]
    pub secret_key: String,
    #[serde(rename = "stack_name", default)]
    pub stack_name: String,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

/// Invocation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Functions {
    #[serde(rename = "watchdog_port")]
    pub watchdog_port: Option<u16>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Metrics {
    pub enabled: bool,
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    fn api(&self) -> Option<&Api>;
    fn name(&self) -> &str;
    fn port(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn rancher(&self) -> &Rancher;
    fn rancher_timeout(&self) -> Duration;
    fn stack_name(&self) -> &str;
    fn watchdog_port(&self) -> u16;
    fn function_timeout(&self) -> Duration;
    fn is_metrics_enabled(&self) -> bool;
}

// Config type alias for convenience
pub type Config = Bridge;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.bridge.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.bridge.env == PROD
    }

    fn api(&self) -> Option<&Api> {
        self.bridge.api.as_ref()
    }

    fn name(&self) -> &str {
        self.api()
            .and_then(|api| api.name.as_deref())
            .unwrap_or(DEFAULT_NAME)
    }

    fn port(&self) -> &str {
        self.api()
            .and_then(|api| api.port.as_deref())
            .unwrap_or(DEFAULT_PORT)
    }

    fn request_timeout(&self) -> Duration {
        self.api()
            .and_then(|api| api.request_timeout)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    fn rancher(&self) -> &Rancher {
        &self.bridge.rancher
    }

    fn rancher_timeout(&self) -> Duration {
        self.bridge.rancher.timeout.unwrap_or(DEFAULT_RANCHER_TIMEOUT)
    }

    fn stack_name(&self) -> &str {
        &self.bridge.rancher.stack_name
    }

    fn watchdog_port(&self) -> u16 {
        self.bridge
            .functions
            .as_ref()
            .and_then(|f| f.watchdog_port)
            .unwrap_or(crate::upstream::proxy::WATCHDOG_PORT)
    }

    fn function_timeout(&self) -> Duration {
        self.bridge
            .functions
            .as_ref()
            .and_then(|f| f.timeout)
            .unwrap_or(DEFAULT_FUNCTION_TIMEOUT)
    }

    fn is_metrics_enabled(&self) -> bool {
        self.bridge.metrics.as_ref().map(|m| m.enabled).unwrap_or(true)
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::from_yaml(&data).with_context(|| format!("unmarshal yaml from {:?}", abs_path))
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }

    /// Applies the orchestrator settings found in the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`; unset or empty variables keep the file value.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let rancher = &mut self.bridge.rancher;
        let targets: [(&str, &mut String); 4] = [
            (ENV_CATTLE_URL, &mut rancher.url),
            (ENV_CATTLE_ACCESS_KEY, &mut rancher.access_key),
            (ENV_CATTLE_SECRET_KEY, &mut rancher.secret_key),
            (ENV_FUNCTION_STACK_NAME, &mut rancher.stack_name),
        ];
        for (key, target) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *target = value;
            }
        }
    }

    /// Checks the settings the bridge cannot start without.
    pub fn validate(&self) -> Result<()> {
        if self.bridge.rancher.url.is_empty() {
            anyhow::bail!("rancher.url is required (or set {})", ENV_CATTLE_URL);
        }
        if self.bridge.rancher.stack_name.is_empty() {
            anyhow::bail!(
                "rancher.stack_name is required (or set {})",
                ENV_FUNCTION_STACK_NAME
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_config;
#[cfg(test)]
pub use test_config::new_test_config;
