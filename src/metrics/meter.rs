use std::time::Duration;

// Metric name constants
pub const BRIDGE_REQUESTS_TOTAL: &str = "bridge_requests_total";
pub const FUNCTION_INVOCATIONS_TOTAL: &str = "function_invocations_total";
pub const FUNCTION_INVOCATION_DURATION: &str = "function_invocation_duration_seconds";
pub const PANICS_TOTAL: &str = "bridge_panics_total";

/// Handler labels.
pub const HANDLER_DEPLOY: &str = "deploy";
pub const HANDLER_DELETE: &str = "delete";
pub const HANDLER_LIST: &str = "list";
pub const HANDLER_REPLICA_READ: &str = "replica_read";
pub const HANDLER_REPLICA_UPDATE: &str = "replica_update";
pub const HANDLER_PROXY: &str = "proxy";

/// Counts one answered control-plane or proxy request.
pub fn inc_request(handler: &'static str, code: u16) {
    metrics::counter!(BRIDGE_REQUESTS_TOTAL, "handler" => handler, "code" => code.to_string())
        .increment(1);
}

/// Records one relayed invocation. `code` is the function's status, or 500 when unreachable.
pub fn observe_invocation(function: &str, code: u16, elapsed: Duration) {
    metrics::counter!(
        FUNCTION_INVOCATIONS_TOTAL,
        "function" => function.to_string(),
        "code" => code.to_string()
    )
    .increment(1);
    metrics::histogram!(FUNCTION_INVOCATION_DURATION, "function" => function.to_string())
        .record(elapsed.as_secs_f64());
}

/// Adds panics.
pub fn add_panics(value: u64) {
    metrics::counter!(PANICS_TOTAL).increment(value);
}
