//! Scripted transport double.

use bytes::Bytes;
use hyper::{HeaderMap, Method, Request, Response, StatusCode};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::upstream::{HttpDoer, TransportError};

/// A request as it reached the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Answers requests from a FIFO script and records everything it sees.
/// An exhausted script behaves like an unreachable host.
#[derive(Default)]
pub struct ScriptedDoer {
    script: Mutex<VecDeque<Result<Response<Bytes>, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedDoer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a JSON answer.
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        let resp = Response::builder()
            .status(StatusCode::from_u16(status).unwrap())
            .header("content-type", "application/json")
            .body(Bytes::from(body.to_string()))
            .unwrap();
        self.respond_with(resp)
    }

    pub fn respond_with(&self, resp: Response<Bytes>) -> &Self {
        self.script.lock().unwrap().push_back(Ok(resp));
        self
    }

    pub fn fail(&self, err: TransportError) -> &Self {
        self.script.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }
}

#[async_trait::async_trait]
impl HttpDoer for ScriptedDoer {
    async fn execute(&self, req: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        let uri = req.uri().to_string();
        let (parts, body) = req.into_parts();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: parts.method,
            uri: uri.clone(),
            headers: parts.headers,
            body,
        });

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connect {
                    uri,
                    reason: "connection refused".to_string(),
                })
            })
    }
}
