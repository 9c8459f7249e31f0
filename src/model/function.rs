//! Platform-facing function descriptors and request bodies.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Function names must be usable as orchestrator service names.
static VALID_DNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\-]+$").expect("valid regex"));

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("({0}) must be a valid DNS entry for service name")]
    InvalidName(String),
    #[error("function name is required")]
    EmptyName,
    #[error("cannot parse request body: {0}")]
    MalformedBody(String),
}

/// Function as seen by the platform.
///
/// Deploy reads it from the request body (`service` is accepted as an alias of
/// `name`); List and Scale-Read render it back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDescriptor {
    #[serde(alias = "service")]
    pub name: String,
    #[serde(default)]
    pub image: String,
    /// `None` on deploy means "not requested"; always set when rendered.
    #[serde(default)]
    pub replicas: Option<u64>,
    #[serde(default)]
    pub env_vars: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_process: Option<String>,
    #[serde(default)]
    pub invocation_count: u64,
}

impl FunctionDescriptor {
    /// Decodes a deploy body and validates the function name.
    pub fn from_deploy_body(body: &[u8]) -> Result<Self, ValidationError> {
        let descriptor: Self = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;
        validate_name(&descriptor.name)?;
        Ok(descriptor)
    }
}

/// Checks a function name against `^[A-Za-z-]+$`.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if VALID_DNS.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName(name.to_string()))
    }
}

/// Body of `DELETE /system/functions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFunctionRequest {
    #[serde(default)]
    pub function_name: String,
}

impl DeleteFunctionRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        let request: Self = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;
        if request.function_name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(request)
    }
}

/// Body of `POST /system/scale-function/{name}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleServiceRequest {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub replicas: u64,
}

impl ScaleServiceRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        serde_json::from_slice(body).map_err(|e| ValidationError::MalformedBody(e.to_string()))
    }
}
