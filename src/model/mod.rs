//! Function descriptors, orchestrator resources and the mapping between them.

pub mod function;
pub mod service;
pub mod translator;

// Re-export main types
pub use function::{
    validate_name, DeleteFunctionRequest, FunctionDescriptor, ScaleServiceRequest, ValidationError,
};
pub use service::{Collection, LaunchConfig, Service, ServiceUpdate, Stack};
pub use translator::{filter_managed_active, to_descriptor, to_service_spec};
