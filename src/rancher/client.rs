//! Rancher (Cattle API) REST client.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, Request, Uri};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};

use super::{BridgeClient, OrchestratorError};
use crate::config::Rancher;
use crate::model::{Collection, Service, ServiceUpdate, Stack};
use crate::upstream::HttpDoer;

/// Client bound to one function stack, resolved once at construction.
pub struct RancherClient {
    http: Arc<dyn HttpDoer>,
    base_url: String,
    authorization: String,
    stack_id: String,
}

impl RancherClient {
    /// Resolves the configured stack and returns a client scoped to it.
    pub async fn connect(cfg: &Rancher, http: Arc<dyn HttpDoer>) -> Result<Self, OrchestratorError> {
        let base_url = cfg.url.trim_end_matches('/').to_string();
        base_url
            .parse::<Uri>()
            .map_err(|e| OrchestratorError::InvalidUrl {
                url: cfg.url.clone(),
                reason: e.to_string(),
            })?;

        let credentials = format!("{}:{}", cfg.access_key, cfg.secret_key);
        let mut client = Self {
            http,
            base_url,
            authorization: format!("Basic {}", STANDARD.encode(credentials)),
            stack_id: String::new(),
        };

        let url = format!(
            "{}/stacks?name={}",
            client.base_url,
            urlencoding::encode(&cfg.stack_name)
        );
        let stacks: Collection<Stack> = client.fetch(Method::GET, &url, None).await?;
        let stack = stacks
            .data
            .into_iter()
            .next()
            .ok_or_else(|| OrchestratorError::StackNotFound(cfg.stack_name.clone()))?;

        info!(
            component = "rancher",
            event = "stack_resolved",
            stack = %cfg.stack_name,
            stack_id = %stack.id,
            "function stack resolved"
        );

        client.stack_id = stack.id;
        Ok(client)
    }

    pub fn stack_id(&self) -> &str {
        &self.stack_id
    }

    /// Performs one authenticated JSON call and returns the raw body of a 2xx answer.
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, OrchestratorError> {
        let req = Request::builder()
            .method(method.clone())
            .uri(url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.authorization.as_str())
            .body(body.map(Bytes::from).unwrap_or_default())
            .map_err(crate::upstream::TransportError::from)?;

        let resp = self.http.execute(req).await?;
        let status = resp.status();

        debug!(
            component = "rancher",
            method = %method,
            uri = %url,
            status = status.as_u16(),
            "orchestrator response"
        );

        if !status.is_success() {
            return Err(OrchestratorError::Status {
                method: method.to_string(),
                uri: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(resp.body()).into_owned(),
            });
        }

        Ok(resp.into_body())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T, OrchestratorError> {
        let raw = self.execute(method, url, body).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn list_services_at(&self, url: &str) -> Result<Vec<Service>, OrchestratorError> {
        let collection: Collection<Service> = self.fetch(Method::GET, url, None).await?;
        Ok(collection.data)
    }
}

#[async_trait::async_trait]
impl BridgeClient for RancherClient {
    async fn list_services(&self) -> Result<Vec<Service>, OrchestratorError> {
        let url = format!("{}/stacks/{}/services", self.base_url, self.stack_id);
        self.list_services_at(&url).await
    }

    async fn find_service_by_name(&self, name: &str) -> Result<Option<Service>, OrchestratorError> {
        let url = format!("{}/services?name={}", self.base_url, urlencoding::encode(name));
        Ok(self.list_services_at(&url).await?.into_iter().next())
    }

    async fn create_service(&self, mut spec: Service) -> Result<Service, OrchestratorError> {
        let url = format!("{}/services", self.base_url);
        spec.stack_id = self.stack_id.clone();
        let body = serde_json::to_vec(&spec)?;
        self.fetch(Method::POST, &url, Some(body)).await
    }

    async fn delete_service(&self, spec: &Service) -> Result<(), OrchestratorError> {
        let url = format!("{}/services/{}", self.base_url, spec.id);
        self.execute(Method::DELETE, &url, None).await?;
        Ok(())
    }

    async fn update_service(
        &self,
        spec: &Service,
        updates: &ServiceUpdate,
    ) -> Result<Service, OrchestratorError> {
        let url = format!("{}/services/{}", self.base_url, spec.id);
        let body = serde_json::to_vec(updates)?;
        self.fetch(Method::PUT, &url, Some(body)).await
    }
}
