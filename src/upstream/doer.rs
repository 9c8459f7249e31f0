//! Outbound HTTP capability shared by the orchestrator client and the invocation proxy.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response};
use std::time::Duration;
use tokio::time::timeout;

use crate::http::client::{create_client, HyperClient};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("build request: {0}")]
    Request(String),
    #[error("request to {uri} failed: {reason}")]
    Connect { uri: String, reason: String },
    #[error("request to {uri} timed out after {timeout:?}")]
    Timeout { uri: String, timeout: Duration },
    #[error("read response body from {uri}: {reason}")]
    Body { uri: String, reason: String },
    #[error("init http client: {0}")]
    Init(String),
}

impl From<hyper::http::Error> for TransportError {
    fn from(e: hyper::http::Error) -> Self {
        TransportError::Request(e.to_string())
    }
}

/// Executes one fully-buffered request/response exchange.
#[async_trait::async_trait]
pub trait HttpDoer: Send + Sync {
    async fn execute(&self, req: Request<Bytes>) -> Result<Response<Bytes>, TransportError>;
}

/// `HttpDoer` over the pooled hyper client, bounded by a per-call timeout
/// covering connect, headers and body.
#[derive(Clone)]
pub struct HyperDoer {
    client: HyperClient,
    timeout: Duration,
}

impl HyperDoer {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = create_client().map_err(|e| TransportError::Init(e.to_string()))?;
        Ok(Self { client, timeout })
    }
}

/// Renders an error with its source chain; hyper's top-level messages are terse.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[async_trait::async_trait]
impl HttpDoer for HyperDoer {
    async fn execute(&self, req: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        let uri = req.uri().to_string();

        let (parts, body) = req.into_parts();
        let body = Full::new(body)
            .map_err(|never: std::convert::Infallible| match never {})
            .boxed();
        let req = Request::from_parts(parts, body);

        let exchange = async {
            let response = self.client.request(req).await.map_err(|e| {
                let reason = error_chain(&e);
                tracing::error!(
                    component = "transport",
                    uri = %uri,
                    error = %reason,
                    "hyper client request failed"
                );
                TransportError::Connect {
                    uri: uri.clone(),
                    reason,
                }
            })?;

            let (parts, body) = response.into_parts();
            let body = body
                .collect()
                .await
                .map_err(|e| TransportError::Body {
                    uri: uri.clone(),
                    reason: error_chain(&e),
                })?
                .to_bytes();

            Ok::<_, TransportError>(Response::from_parts(parts, body))
        };

        match timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    component = "transport",
                    uri = %uri,
                    timeout = ?self.timeout,
                    "request timed out"
                );
                Err(TransportError::Timeout {
                    uri,
                    timeout: self.timeout,
                })
            }
        }
    }
}
