//! Orchestrator (Rancher) service resources.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Lifecycle state of a service that is ready to receive traffic.
pub const STATE_ACTIVE: &str = "active";

/// Rancher answers `null` for empty maps; treat it as the default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Launch configuration of a Rancher service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub environment: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub restart_policy: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_uuid: String,
}

/// Rancher service resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub stack_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_on_create: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scale: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_config: Option<LaunchConfig>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state: String,
}

impl Service {
    /// Only the literal `active` state counts as ready.
    pub fn is_active(&self) -> bool {
        self.state == STATE_ACTIVE
    }

    /// Returns the value of a launch-config label, if any.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.launch_config
            .as_ref()
            .and_then(|lc| lc.labels.get(key))
            .map(String::as_str)
    }
}

/// Mutable service fields sent with a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u64>,
}

impl ServiceUpdate {
    pub fn scale(replicas: u64) -> Self {
        Self {
            scale: Some(replicas),
        }
    }
}

/// Collection envelope used by the Rancher API.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub data: Vec<T>,
}

/// Rancher stack; only the identifier is needed.
#[derive(Debug, Clone, Deserialize)]
pub struct Stack {
    pub id: String,
}
