//! Prometheus metrics functionality.
//
//! Metrics organization:
//! - Request counters per handler: bridge_requests_total{handler,code}
//! - Invocation counters and latency per function: function_invocations_total, function_invocation_duration_seconds
//! - Rendering: controller::metrics

pub mod meter;

// Re-export commonly used items
pub use meter::*;
