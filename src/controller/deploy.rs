//! Function deploy controller.

use axum::{body::Bytes, http::StatusCode, response::Response, routing::post, Router};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::reader::SYSTEM_FUNCTIONS_PATH;
use crate::http::response::reply;
use crate::http::Controller;
use crate::metrics::HANDLER_DEPLOY;
use crate::model::{to_service_spec, FunctionDescriptor};
use crate::rancher::BridgeClient;

/// DeployController answers `POST /system/functions` by creating a service in the stack.
#[derive(Clone)]
pub struct DeployController {
    client: Arc<dyn BridgeClient>,
}

impl DeployController {
    pub fn new(client: Arc<dyn BridgeClient>) -> Self {
        Self { client }
    }

    async fn deploy(&self, body: Bytes) -> Response {
        let descriptor = match FunctionDescriptor::from_deploy_body(&body) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!(
                    component = "controller",
                    handler = HANDLER_DEPLOY,
                    event = "invalid_request",
                    error = %e,
                    "deploy request rejected"
                );
                return reply(HANDLER_DEPLOY, StatusCode::BAD_REQUEST, e.to_string());
            }
        };

        let spec = to_service_spec(&descriptor);
        if let Err(e) = self.client.create_service(spec).await {
            error!(
                component = "controller",
                handler = HANDLER_DEPLOY,
                event = "create_failed",
                function = %descriptor.name,
                error = %e,
                "failed to create service"
            );
            return reply(HANDLER_DEPLOY, StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }

        info!(
            component = "controller",
            handler = HANDLER_DEPLOY,
            event = "created",
            function = %descriptor.name,
            image = %descriptor.image,
            "created service"
        );
        debug!(body = %String::from_utf8_lossy(&body), "deploy request body");

        reply(HANDLER_DEPLOY, StatusCode::ACCEPTED, "")
    }
}

impl Controller for DeployController {
    fn add_route(&self, router: Router) -> Router {
        let controller = self.clone();
        router.route(
            SYSTEM_FUNCTIONS_PATH,
            post(move |body: Bytes| {
                let controller = controller.clone();
                async move { controller.deploy(body).await }
            }),
        )
    }
}
