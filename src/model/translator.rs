//! Mapping between function descriptors and orchestrator services.

use std::collections::HashMap;

use super::function::FunctionDescriptor;
use super::service::{LaunchConfig, Service};

/// Label marking a service as a managed function; its value is the function name.
pub const FAAS_FUNCTION_LABEL: &str = "faas_function";
/// Rancher hint to pull the image on every container start.
pub const PULL_IMAGE_LABEL: &str = "io.rancher.container.pull_image";
/// Reserved environment key carrying the entry-process override.
pub const ENV_PROCESS_KEY: &str = "fprocess";

const DEFAULT_REPLICAS: u64 = 1;

/// Builds the service spec submitted on deploy.
///
/// The entry-process override always replaces a caller-supplied `fprocess`
/// environment value. The stack identifier is left for the client to inject.
pub fn to_service_spec(descriptor: &FunctionDescriptor) -> Service {
    let mut environment = descriptor.env_vars.clone();
    if let Some(process) = descriptor.env_process.as_deref().filter(|p| !p.is_empty()) {
        environment.insert(ENV_PROCESS_KEY.to_string(), process.to_string());
    }

    let labels = HashMap::from([
        (FAAS_FUNCTION_LABEL.to_string(), descriptor.name.clone()),
        (PULL_IMAGE_LABEL.to_string(), "always".to_string()),
    ]);

    let restart_policy = HashMap::from([("name".to_string(), "always".to_string())]);

    Service {
        name: descriptor.name.clone(),
        scale: descriptor.replicas.unwrap_or(DEFAULT_REPLICAS),
        start_on_create: true,
        launch_config: Some(LaunchConfig {
            environment,
            labels,
            restart_policy,
            image_uuid: descriptor.image.clone(),
        }),
        ..Default::default()
    }
}

/// Label guard: is this service one of ours?
pub fn is_managed_function(service: &Service) -> bool {
    service.label(FAAS_FUNCTION_LABEL).is_some()
}

/// Maps an active, labeled service back to a descriptor; anything else is filtered out.
pub fn to_descriptor(service: &Service) -> Option<FunctionDescriptor> {
    if !service.is_active() || !is_managed_function(service) {
        return None;
    }

    let launch_config = service.launch_config.as_ref()?;
    let mut env_vars = launch_config.environment.clone();
    let env_process = env_vars.remove(ENV_PROCESS_KEY);

    Some(FunctionDescriptor {
        name: service.name.clone(),
        image: launch_config.image_uuid.clone(),
        replicas: Some(service.scale),
        env_vars,
        env_process,
        invocation_count: 0,
    })
}

/// Keeps active managed functions, in input order.
pub fn filter_managed_active(services: &[Service]) -> Vec<FunctionDescriptor> {
    services.iter().filter_map(to_descriptor).collect()
}
