//! Route table cases: path rules, method merging and ambient endpoints.

use hyper::{Method, StatusCode};

use crate::support::{router, send, MockBridgeClient, ScriptedDoer};

#[tokio::test]
async fn test_healthz_answers_ok() {
    let app = router(MockBridgeClient::new(), ScriptedDoer::new());

    let resp = send(&app, Method::GET, "/healthz", "").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["status"], 200);
}

#[tokio::test]
async fn test_names_outside_path_pattern_are_not_found() {
    let client = MockBridgeClient::new();
    let doer = ScriptedDoer::new();
    let app = router(client.clone(), doer.clone());

    for (method, uri) in [
        (Method::GET, "/system/function/bad.name"),
        (Method::POST, "/system/scale-function/bad%20name"),
        (Method::POST, "/function/bad.name"),
    ] {
        let resp = send(&app, method, uri, r#"{"replicas":1}"#).await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND, "{uri}");
    }

    assert!(client.calls().is_empty());
    assert!(doer.requests().is_empty());
}

#[tokio::test]
async fn test_unregistered_methods_are_rejected() {
    let app = router(MockBridgeClient::new(), ScriptedDoer::new());

    let resp = send(&app, Method::PUT, "/system/functions", "").await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);

    let resp = send(&app, Method::GET, "/system/scale-function/echo", "").await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_metrics_route_follows_config() {
    // Test config disables metrics.
    let app = router(MockBridgeClient::new(), ScriptedDoer::new());

    let resp = send(&app, Method::GET, "/metrics", "").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
