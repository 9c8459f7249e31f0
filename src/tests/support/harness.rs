//! Router driven in-process through tower's oneshot.

use axum::body::Body;
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::{HeaderMap, Method, Request, StatusCode};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use super::{MockBridgeClient, ScriptedDoer};
use crate::app::App;
use crate::config::new_test_config;

/// Full bridge router, with middlewares, over the given doubles.
pub fn router(client: Arc<MockBridgeClient>, doer: Arc<ScriptedDoer>) -> Router {
    App::with_dependencies(CancellationToken::new(), new_test_config(), client, doer)
        .expect("assemble app")
        .router()
}

/// Buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

pub async fn send(router: &Router, method: Method, uri: &str, body: impl Into<Body>) -> TestResponse {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.into())
        .expect("request");
    send_request(router, req).await
}

pub async fn send_request(router: &Router, req: Request<Body>) -> TestResponse {
    let resp = router.clone().oneshot(req).await.expect("infallible");
    let (parts, body) = resp.into_parts();
    let body = body.collect().await.expect("read body").to_bytes();
    TestResponse {
        status: parts.status,
        headers: parts.headers,
        body,
    }
}
