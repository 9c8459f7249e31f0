//! Function listing controller.

use axum::{http::StatusCode, response::Response, routing::get, Router};
use std::sync::Arc;
use tracing::error;

use crate::http::response::{reply, reply_json};
use crate::http::Controller;
use crate::metrics::HANDLER_LIST;
use crate::model::{filter_managed_active, FunctionDescriptor};
use crate::rancher::{BridgeClient, OrchestratorError};

pub const SYSTEM_FUNCTIONS_PATH: &str = "/system/functions";

/// Lists the stack and keeps the active managed functions.
pub(crate) async fn list_functions(
    client: &dyn BridgeClient,
) -> Result<Vec<FunctionDescriptor>, OrchestratorError> {
    let services = client.list_services().await?;
    Ok(filter_managed_active(&services))
}

/// FunctionReaderController answers `GET /system/functions`.
#[derive(Clone)]
pub struct FunctionReaderController {
    client: Arc<dyn BridgeClient>,
}

impl FunctionReaderController {
    pub fn new(client: Arc<dyn BridgeClient>) -> Self {
        Self { client }
    }

    async fn list(&self) -> Response {
        let functions = match list_functions(self.client.as_ref()).await {
            Ok(functions) => functions,
            Err(e) => {
                error!(
                    component = "controller",
                    handler = HANDLER_LIST,
                    event = "list_failed",
                    error = %e,
                    "failed to list functions"
                );
                return reply(HANDLER_LIST, StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
            }
        };

        match serde_json::to_vec(&functions) {
            Ok(body) => reply_json(HANDLER_LIST, body),
            Err(e) => reply(HANDLER_LIST, StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}

impl Controller for FunctionReaderController {
    fn add_route(&self, router: Router) -> Router {
        let controller = self.clone();
        router.route(
            SYSTEM_FUNCTIONS_PATH,
            get(move || {
                let controller = controller.clone();
                async move { controller.list().await }
            }),
        )
    }
}
