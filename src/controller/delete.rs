//! Function delete controller.

use axum::{body::Bytes, http::StatusCode, response::Response, routing::delete, Router};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::reader::SYSTEM_FUNCTIONS_PATH;
use crate::http::response::reply;
use crate::http::Controller;
use crate::metrics::HANDLER_DELETE;
use crate::model::DeleteFunctionRequest;
use crate::rancher::BridgeClient;

/// DeleteController answers `DELETE /system/functions`.
///
/// The service is looked up by name before deletion so that only a named
/// stack member is ever removed.
#[derive(Clone)]
pub struct DeleteController {
    client: Arc<dyn BridgeClient>,
}

impl DeleteController {
    pub fn new(client: Arc<dyn BridgeClient>) -> Self {
        Self { client }
    }

    async fn delete(&self, body: Bytes) -> Response {
        let request = match DeleteFunctionRequest::from_body(&body) {
            Ok(request) => request,
            Err(e) => {
                warn!(
                    component = "controller",
                    handler = HANDLER_DELETE,
                    event = "invalid_request",
                    error = %e,
                    "delete request rejected"
                );
                return reply(HANDLER_DELETE, StatusCode::BAD_REQUEST, e.to_string());
            }
        };
        let name = request.function_name;

        let service = match self.client.find_service_by_name(&name).await {
            Ok(Some(service)) => service,
            Ok(None) => return reply(HANDLER_DELETE, StatusCode::NOT_FOUND, ""),
            Err(e) => {
                error!(
                    component = "controller",
                    handler = HANDLER_DELETE,
                    event = "lookup_failed",
                    function = %name,
                    error = %e,
                    "failed to look up service"
                );
                return reply(HANDLER_DELETE, StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
            }
        };

        if let Err(e) = self.client.delete_service(&service).await {
            warn!(
                component = "controller",
                handler = HANDLER_DELETE,
                event = "delete_failed",
                function = %name,
                error = %e,
                "failed to delete service"
            );
            return reply(HANDLER_DELETE, StatusCode::BAD_REQUEST, e.to_string());
        }

        info!(
            component = "controller",
            handler = HANDLER_DELETE,
            event = "deleted",
            function = %name,
            service_id = %service.id,
            "deleted service"
        );

        reply(HANDLER_DELETE, StatusCode::OK, "")
    }
}

impl Controller for DeleteController {
    fn add_route(&self, router: Router) -> Router {
        let controller = self.clone();
        router.route(
            SYSTEM_FUNCTIONS_PATH,
            delete(move |body: Bytes| {
                let controller = controller.clone();
                async move { controller.delete(body).await }
            }),
        )
    }
}
