//! Header copying and target resolution for function invocations.

use hyper::header::{HeaderMap, HOST};

/// Port the function watchdog listens on inside every function container.
pub const WATCHDOG_PORT: u16 = 8080;

/// Hop-by-hop headers that must not be forwarded by proxies (RFC 7230, section 6.1).
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "proxy-connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// Resolves the in-stack address of a function: `<function>.<stack>:<port>`.
/// No lookup is made; the orchestrator DNS is expected to resolve it.
pub fn function_url(function: &str, stack: &str, port: u16) -> String {
    format!("http://{}.{}:{}/", function, stack, port)
}

/// Copies every header except hop-by-hop ones into `dst`, keeping all values
/// of repeated headers. Existing entries of the same name are replaced.
pub fn copy_headers(dst: &mut HeaderMap, src: &HeaderMap) {
    for name in src.keys() {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        dst.remove(name);
        for value in src.get_all(name) {
            dst.append(name.clone(), value.clone());
        }
    }
}

/// Headers of the inbound request as they are sent to the function.
/// `Host` is dropped so the outbound request carries the target's own authority.
pub fn forward_headers(src: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(src.len());
    copy_headers(&mut out, src);
    out.remove(HOST);
    out
}
