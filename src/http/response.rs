//! Handler replies.

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::metrics;

/// Builds a reply for `handler` and counts it. An empty body is sent without a content type.
pub fn reply(handler: &'static str, status: StatusCode, body: impl Into<String>) -> Response {
    metrics::inc_request(handler, status.as_u16());
    let body: String = body.into();
    if body.is_empty() {
        status.into_response()
    } else {
        (status, body).into_response()
    }
}

/// JSON reply for `handler`.
pub fn reply_json(handler: &'static str, body: Vec<u8>) -> Response {
    metrics::inc_request(handler, StatusCode::OK.as_u16());
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        Body::from(body),
    )
        .into_response()
}
