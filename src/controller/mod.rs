//! HTTP API controllers for the function lifecycle and invocation endpoints.

pub mod controller;
pub mod delete;
pub mod deploy;
pub mod invoke;
pub mod metrics;
pub mod probe;
pub mod reader;
pub mod replicas;

// Re-export controller types for convenience
pub use delete::DeleteController;
pub use deploy::DeployController;
pub use invoke::InvokeController;
pub use metrics::PrometheusMetricsController;
pub use probe::LivenessProbeController;
pub use reader::FunctionReaderController;
pub use replicas::{ReplicaReaderController, ReplicaUpdaterController};
