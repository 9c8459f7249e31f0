//! Orchestrator capability surface and its Rancher implementation.

mod client;


use crate::model::{Service, ServiceUpdate};
use crate::upstream::TransportError;

pub use client::RancherClient;

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{method} {uri} answered {status}: {body}")]
    Status {
        method: String,
        uri: String,
        status: u16,
        body: String,
    },
    #[error("decode orchestrator response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no stack named {0} found")]
    StackNotFound(String),
    #[error("invalid orchestrator url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Operations the bridge needs from the orchestrator. Every call is a fresh
/// remote round-trip scoped to the function stack.
#[async_trait::async_trait]
pub trait BridgeClient: Send + Sync {
    /// All services of the function stack, unfiltered.
    async fn list_services(&self) -> Result<Vec<Service>, OrchestratorError>;

    /// First service with the given name; `Ok(None)` when nothing matches.
    async fn find_service_by_name(&self, name: &str) -> Result<Option<Service>, OrchestratorError>;

    /// Creates a service in the function stack; the stack id is injected here.
    async fn create_service(&self, spec: Service) -> Result<Service, OrchestratorError>;

    /// Deletes a service. Deleting a missing service is an error.
    async fn delete_service(&self, spec: &Service) -> Result<(), OrchestratorError>;

    /// Applies only the given field updates.
    async fn update_service(
        &self,
        spec: &Service,
        updates: &ServiceUpdate,
    ) -> Result<Service, OrchestratorError>;
}
