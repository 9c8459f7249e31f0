//! Function invocation proxy.

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, Path},
    http::{HeaderMap, Method, Request, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::http::response::reply;
use crate::http::vars::is_valid_path_name;
use crate::http::Controller;
use crate::metrics::{self, HANDLER_PROXY};
use crate::upstream::proxy::{copy_headers, forward_headers, function_url};
use crate::upstream::HttpDoer;

pub const INVOKE_PATH: &str = "/function/:name";
pub const INVOKE_PATH_SLASH: &str = "/function/:name/";

/// InvokeController forwards `POST /function/{name}` to the function's watchdog
/// and relays the answer. The caller always receives 200 on a reachable target.
#[derive(Clone)]
pub struct InvokeController {
    http: Arc<dyn HttpDoer>,
    stack_name: Arc<str>,
    watchdog_port: u16,
}

impl InvokeController {
    pub fn new(http: Arc<dyn HttpDoer>, stack_name: &str, watchdog_port: u16) -> Self {
        Self {
            http,
            stack_name: Arc::from(stack_name),
            watchdog_port,
        }
    }

    async fn invoke(&self, name: String, method: Method, headers: HeaderMap, body: Bytes) -> Response {
        if !is_valid_path_name(&name) {
            return reply(HANDLER_PROXY, StatusCode::NOT_FOUND, "");
        }
        if method != Method::POST {
            return reply(HANDLER_PROXY, StatusCode::BAD_REQUEST, "");
        }

        let stamp = chrono::Utc::now().timestamp();
        let started = Instant::now();

        let url = function_url(&name, &self.stack_name, self.watchdog_port);
        let result = match Request::builder().method(Method::POST).uri(&url).body(body) {
            Ok(mut req) => {
                *req.headers_mut() = forward_headers(&headers);
                self.http.execute(req).await
            }
            Err(e) => Err(e.into()),
        };

        let elapsed = started.elapsed();
        info!(
            component = "proxy",
            event = "invocation_latency",
            stamp = stamp,
            function = %name,
            seconds = elapsed.as_secs_f64(),
            "[{}] took {:.6} seconds",
            stamp,
            elapsed.as_secs_f64()
        );

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                error!(
                    component = "proxy",
                    event = "unreachable",
                    function = %name,
                    url = %url,
                    error = %e,
                    "can't reach function"
                );
                metrics::observe_invocation(&name, StatusCode::INTERNAL_SERVER_ERROR.as_u16(), elapsed);
                return reply(
                    HANDLER_PROXY,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Can't reach service: {name}"),
                );
            }
        };

        metrics::observe_invocation(&name, resp.status().as_u16(), elapsed);
        metrics::inc_request(HANDLER_PROXY, StatusCode::OK.as_u16());

        let (parts, body) = resp.into_parts();
        let mut out = Response::new(Body::from(body));
        copy_headers(out.headers_mut(), &parts.headers);
        out
    }

    fn route(&self) -> axum::routing::MethodRouter {
        let controller = self.clone();
        any(
            move |Path(name): Path<String>, method: Method, headers: HeaderMap, body: Bytes| {
                let controller = controller.clone();
                async move { controller.invoke(name, method, headers, body).await }
            },
        )
        .layer(DefaultBodyLimit::disable())
    }
}

impl Controller for InvokeController {
    fn add_route(&self, router: Router) -> Router {
        router
            .route(INVOKE_PATH, self.route())
            .route(INVOKE_PATH_SLASH, self.route())
    }
}
