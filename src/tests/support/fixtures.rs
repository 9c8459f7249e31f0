//! Orchestrator services as the stack would report them.

use std::collections::HashMap;

use crate::model::service::STATE_ACTIVE;
use crate::model::translator::{ENV_PROCESS_KEY, FAAS_FUNCTION_LABEL};
use crate::model::{LaunchConfig, Service};

/// Active, labeled function service.
pub fn managed_service(name: &str, scale: u64) -> Service {
    Service {
        id: format!("1s-{name}"),
        stack_id: "1st5".to_string(),
        name: name.to_string(),
        scale,
        state: STATE_ACTIVE.to_string(),
        start_on_create: true,
        launch_config: Some(LaunchConfig {
            image_uuid: format!("docker:functions/{name}"),
            environment: HashMap::from([
                ("SOME_ENV".to_string(), "SOME_VALUE".to_string()),
                (ENV_PROCESS_KEY.to_string(), "cat".to_string()),
            ]),
            labels: HashMap::from([(FAAS_FUNCTION_LABEL.to_string(), name.to_string())]),
            restart_policy: HashMap::new(),
        }),
    }
}

/// Active service without the function label.
pub fn foreign_service(name: &str) -> Service {
    let mut service = managed_service(name, 1);
    if let Some(lc) = service.launch_config.as_mut() {
        lc.labels.clear();
    }
    service
}

/// Labeled function service in the given state.
pub fn service_in_state(name: &str, state: &str) -> Service {
    Service {
        state: state.to_string(),
        ..managed_service(name, 1)
    }
}
