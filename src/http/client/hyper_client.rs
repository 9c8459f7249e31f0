//! Hyper HTTP client used for orchestrator calls and function invocations.
//!
//! Connection pool settings:
//! - Max idle connections per host: 256
//! - Max idle connection duration: 30s
//! - Connection timeout: 2s
//! - TCP keep-alive: 30s
//! - TCP_NODELAY: enabled

use std::time::Duration;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::dns::GaiResolver;
use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;

/// Connection pool configuration constants.
pub const CONNS_PER_HOST: usize = 256;
pub const MAX_IDLE_CONN_DURATION: Duration = Duration::from_secs(30);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

pub type HyperClient = Client<HttpsConnector<HttpConnector<GaiResolver>>, BoxBody<Bytes, hyper::Error>>;

/// Creates a pooled Hyper client speaking plain HTTP and HTTPS.
///
/// Function instances are reached over plain HTTP on the stack network; the
/// orchestrator API is usually served over TLS, verified against native roots.
pub fn create_client() -> std::io::Result<HyperClient> {
    let resolver = GaiResolver::new();

    let mut http_connector = HttpConnector::new_with_resolver(resolver);
    http_connector.set_nodelay(true);
    http_connector.set_keepalive(Some(Duration::from_secs(30)));
    http_connector.set_connect_timeout(Some(CONNECT_TIMEOUT));
    http_connector.enforce_http(false);

    let tls = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .wrap_connector(http_connector);

    Ok(Client::builder(TokioExecutor::new())
        .pool_idle_timeout(MAX_IDLE_CONN_DURATION)
        .pool_max_idle_per_host(CONNS_PER_HOST)
        .http1_title_case_headers(false)
        .build(tls))
}
