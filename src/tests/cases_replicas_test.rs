//! Replica read and scale cases.

use hyper::{Method, StatusCode};

use crate::model::ServiceUpdate;
use crate::support::{
    foreign_service, managed_service, router, send, service_in_state, Call, MockBridgeClient,
    ScriptedDoer,
};

#[tokio::test]
async fn test_read_returns_matching_descriptor() {
    let client = MockBridgeClient::new();
    client.on_list(Ok(vec![managed_service("other", 1), managed_service("sized", 3)]));
    let app = router(client, ScriptedDoer::new());

    let resp = send(&app, Method::GET, "/system/function/sized", "").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.headers["content-type"], "application/json");
    let body = resp.json();
    assert_eq!(body["name"], "sized");
    assert_eq!(body["replicas"], 3);
    assert_eq!(body["invocationCount"], 0);
}

#[tokio::test]
async fn test_read_unknown_or_filtered_function_is_not_found() {
    for name in ["ghost", "database", "booting"] {
        let client = MockBridgeClient::new();
        client.on_list(Ok(vec![
            foreign_service("database"),
            service_in_state("booting", "upgrading"),
        ]));
        let app = router(client, ScriptedDoer::new());

        let resp = send(&app, Method::GET, &format!("/system/function/{name}"), "").await;

        assert_eq!(resp.status, StatusCode::NOT_FOUND, "name {name}");
    }
}

#[tokio::test]
async fn test_read_list_error_is_server_fault() {
    let client = MockBridgeClient::new();
    client.on_list(Err("timeout"));
    let app = router(client, ScriptedDoer::new());

    let resp = send(&app, Method::GET, "/system/function/sized", "").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_scale_updates_only_the_scale() {
    let client = MockBridgeClient::new();
    let service = managed_service("sized", 1);
    client
        .on_find(Ok(Some(service.clone())))
        .on_update(Ok(managed_service("sized", 5)));
    let app = router(client.clone(), ScriptedDoer::new());

    let resp = send(
        &app,
        Method::POST,
        "/system/scale-function/sized",
        r#"{"serviceName":"sized","replicas":5}"#,
    )
    .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.is_empty());
    assert_eq!(
        client.calls(),
        vec![
            Call::Find("sized".to_string()),
            Call::Update(service, ServiceUpdate::scale(5)),
        ]
    );
}

#[tokio::test]
async fn test_scale_rejects_malformed_body() {
    for body in ["", "{\"replicas\": \"many\"}", "[1]"] {
        let client = MockBridgeClient::new();
        let app = router(client.clone(), ScriptedDoer::new());

        let resp = send(&app, Method::POST, "/system/scale-function/sized", body).await;

        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(resp.text(), "Cannot parse request. Please pass valid JSON.");
        assert!(client.calls().is_empty());
    }
}

#[tokio::test]
async fn test_scale_empty_object_scales_to_zero() {
    let service = managed_service("sized", 2);
    let client = MockBridgeClient::new();
    client
        .on_find(Ok(Some(service.clone())))
        .on_update(Ok(managed_service("sized", 0)));
    let app = router(client.clone(), ScriptedDoer::new());

    let resp = send(&app, Method::POST, "/system/scale-function/sized", "{}").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        client.calls(),
        vec![
            Call::Find("sized".to_string()),
            Call::Update(service, ServiceUpdate::scale(0)),
        ]
    );
}

#[tokio::test]
async fn test_scale_lookup_failure_names_the_function() {
    let client = MockBridgeClient::new();
    client.on_find(Ok(None));
    let app = router(client.clone(), ScriptedDoer::new());

    let resp = send(&app, Method::POST, "/system/scale-function/ghost", r#"{"replicas":2}"#).await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.text(), "Unable to lookup function deployment ghost");

    let client = MockBridgeClient::new();
    client.on_find(Err("auth failed"));
    let app = router(client.clone(), ScriptedDoer::new());

    let resp = send(&app, Method::POST, "/system/scale-function/ghost", r#"{"replicas":2}"#).await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.text(), "Unable to lookup function deployment ghost");
}

#[tokio::test]
async fn test_scale_update_failure_names_the_function() {
    let client = MockBridgeClient::new();
    client
        .on_find(Ok(Some(managed_service("sized", 1))))
        .on_update(Err("conflict"));
    let app = router(client, ScriptedDoer::new());

    let resp = send(&app, Method::POST, "/system/scale-function/sized", r#"{"replicas":2}"#).await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.text(), "Unable to update function deployment sized");
}
