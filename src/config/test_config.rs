use super::{Api, Bridge, BridgeBox, Config, Functions, Logs, Metrics, Rancher};
use std::time::Duration;

/// Creates a new test configuration.
pub fn new_test_config() -> Config {
    Bridge {
        bridge: BridgeBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            api: Some(Api {
                name: Some("faas-rancher:8080".to_string()),
                port: Some("8080".to_string()),
                request_timeout: Some(Duration::from_secs(8)),
            }),
            rancher: Rancher {
                url: "http://rancher.test/v2-beta/projects/1a5".to_string(),
                access_key: "access".to_string(),
                secret_key: "secret".to_string(),
                stack_name: "faas-functions".to_string(),
                timeout: Some(Duration::from_secs(2)),
            },
            functions: Some(Functions {
                watchdog_port: Some(8080),
                timeout: Some(Duration::from_secs(8)),
            }),
            metrics: Some(Metrics { enabled: false }),
        },
    }
}
