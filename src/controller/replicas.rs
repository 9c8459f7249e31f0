//! Replica read and scale controllers.

use axum::{
    body::Bytes,
    extract::Path,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::reader::list_functions;
use crate::http::response::{reply, reply_json};
use crate::http::vars::is_valid_path_name;
use crate::http::Controller;
use crate::metrics::{HANDLER_REPLICA_READ, HANDLER_REPLICA_UPDATE};
use crate::model::{ScaleServiceRequest, ServiceUpdate};
use crate::rancher::BridgeClient;

pub const FUNCTION_PATH: &str = "/system/function/:name";
pub const SCALE_FUNCTION_PATH: &str = "/system/scale-function/:name";

const MSG_CANNOT_PARSE: &str = "Cannot parse request. Please pass valid JSON.";

/// ReplicaReaderController answers `GET /system/function/{name}` with the function descriptor.
#[derive(Clone)]
pub struct ReplicaReaderController {
    client: Arc<dyn BridgeClient>,
}

impl ReplicaReaderController {
    pub fn new(client: Arc<dyn BridgeClient>) -> Self {
        Self { client }
    }

    async fn read(&self, name: String) -> Response {
        if !is_valid_path_name(&name) {
            return reply(HANDLER_REPLICA_READ, StatusCode::NOT_FOUND, "");
        }

        let functions = match list_functions(self.client.as_ref()).await {
            Ok(functions) => functions,
            Err(e) => {
                error!(
                    component = "controller",
                    handler = HANDLER_REPLICA_READ,
                    event = "list_failed",
                    function = %name,
                    error = %e,
                    "failed to list functions"
                );
                return reply(HANDLER_REPLICA_READ, StatusCode::INTERNAL_SERVER_ERROR, "");
            }
        };

        let Some(found) = functions.into_iter().find(|f| f.name == name) else {
            return reply(HANDLER_REPLICA_READ, StatusCode::NOT_FOUND, "");
        };

        match serde_json::to_vec(&found) {
            Ok(body) => reply_json(HANDLER_REPLICA_READ, body),
            Err(e) => reply(HANDLER_REPLICA_READ, StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}

impl Controller for ReplicaReaderController {
    fn add_route(&self, router: Router) -> Router {
        let controller = self.clone();
        router.route(
            FUNCTION_PATH,
            get(move |Path(name): Path<String>| {
                let controller = controller.clone();
                async move { controller.read(name).await }
            }),
        )
    }
}

/// ReplicaUpdaterController answers `POST /system/scale-function/{name}`.
/// Only the scale field of the service is changed.
#[derive(Clone)]
pub struct ReplicaUpdaterController {
    client: Arc<dyn BridgeClient>,
}

impl ReplicaUpdaterController {
    pub fn new(client: Arc<dyn BridgeClient>) -> Self {
        Self { client }
    }

    async fn scale(&self, name: String, body: Bytes) -> Response {
        if !is_valid_path_name(&name) {
            return reply(HANDLER_REPLICA_UPDATE, StatusCode::NOT_FOUND, "");
        }

        let request = match ScaleServiceRequest::from_body(&body) {
            Ok(request) => request,
            Err(e) => {
                warn!(
                    component = "controller",
                    handler = HANDLER_REPLICA_UPDATE,
                    event = "invalid_request",
                    function = %name,
                    error = %e,
                    "{}", MSG_CANNOT_PARSE
                );
                return reply(HANDLER_REPLICA_UPDATE, StatusCode::BAD_REQUEST, MSG_CANNOT_PARSE);
            }
        };

        let service = match self.client.find_service_by_name(&name).await {
            Ok(Some(service)) => service,
            lookup => {
                let reason = match lookup {
                    Err(e) => e.to_string(),
                    _ => "no such service".to_string(),
                };
                error!(
                    component = "controller",
                    handler = HANDLER_REPLICA_UPDATE,
                    event = "lookup_failed",
                    function = %name,
                    error = %reason,
                    "failed to look up service"
                );
                return reply(
                    HANDLER_REPLICA_UPDATE,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Unable to lookup function deployment {name}"),
                );
            }
        };

        if let Err(e) = self
            .client
            .update_service(&service, &ServiceUpdate::scale(request.replicas))
            .await
        {
            error!(
                component = "controller",
                handler = HANDLER_REPLICA_UPDATE,
                event = "update_failed",
                function = %name,
                error = %e,
                "failed to update service"
            );
            return reply(
                HANDLER_REPLICA_UPDATE,
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unable to update function deployment {name}"),
            );
        }

        info!(
            component = "controller",
            handler = HANDLER_REPLICA_UPDATE,
            event = "scaled",
            function = %name,
            replicas = request.replicas,
            "updated replicas"
        );

        reply(HANDLER_REPLICA_UPDATE, StatusCode::OK, "")
    }
}

impl Controller for ReplicaUpdaterController {
    fn add_route(&self, router: Router) -> Router {
        let controller = self.clone();
        router.route(
            SCALE_FUNCTION_PATH,
            post(move |Path(name): Path<String>, body: Bytes| {
                let controller = controller.clone();
                async move { controller.scale(name, body).await }
            }),
        )
    }
}
