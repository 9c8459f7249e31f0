//! Recording BridgeClient double.

use std::sync::{Arc, Mutex};

use crate::model::{Service, ServiceUpdate};
use crate::rancher::{BridgeClient, OrchestratorError};
use crate::upstream::TransportError;

/// One call observed by the double.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Find(String),
    Create(Service),
    Delete(Service),
    Update(Service, ServiceUpdate),
}

/// Builds a remote error whose message contains `msg`.
pub fn remote_error(msg: &str) -> OrchestratorError {
    OrchestratorError::Transport(TransportError::Connect {
        uri: "http://rancher.test/v2-beta".to_string(),
        reason: msg.to_string(),
    })
}

type Scripted<T> = Mutex<Option<Result<T, String>>>;

/// Unscripted operations panic, so a test fails loudly on any unexpected remote call.
#[derive(Default)]
pub struct MockBridgeClient {
    list: Scripted<Vec<Service>>,
    find: Scripted<Option<Service>>,
    create: Scripted<Service>,
    delete: Scripted<()>,
    update: Scripted<Service>,
    calls: Mutex<Vec<Call>>,
}

impl MockBridgeClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on_list(&self, result: Result<Vec<Service>, &str>) -> &Self {
        *self.list.lock().unwrap() = Some(result.map_err(str::to_string));
        self
    }

    pub fn on_find(&self, result: Result<Option<Service>, &str>) -> &Self {
        *self.find.lock().unwrap() = Some(result.map_err(str::to_string));
        self
    }

    pub fn on_create(&self, result: Result<Service, &str>) -> &Self {
        *self.create.lock().unwrap() = Some(result.map_err(str::to_string));
        self
    }

    pub fn on_delete(&self, result: Result<(), &str>) -> &Self {
        *self.delete.lock().unwrap() = Some(result.map_err(str::to_string));
        self
    }

    pub fn on_update(&self, result: Result<Service, &str>) -> &Self {
        *self.update.lock().unwrap() = Some(result.map_err(str::to_string));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn answer<T: Clone>(slot: &Scripted<T>, op: &str) -> Result<T, OrchestratorError> {
        match slot.lock().unwrap().as_ref() {
            Some(Ok(v)) => Ok(v.clone()),
            Some(Err(msg)) => Err(remote_error(msg)),
            None => panic!("unexpected call to {op}"),
        }
    }
}

#[async_trait::async_trait]
impl BridgeClient for MockBridgeClient {
    async fn list_services(&self) -> Result<Vec<Service>, OrchestratorError> {
        self.record(Call::List);
        Self::answer(&self.list, "list_services")
    }

    async fn find_service_by_name(&self, name: &str) -> Result<Option<Service>, OrchestratorError> {
        self.record(Call::Find(name.to_string()));
        Self::answer(&self.find, "find_service_by_name")
    }

    async fn create_service(&self, spec: Service) -> Result<Service, OrchestratorError> {
        self.record(Call::Create(spec));
        Self::answer(&self.create, "create_service")
    }

    async fn delete_service(&self, spec: &Service) -> Result<(), OrchestratorError> {
        self.record(Call::Delete(spec.clone()));
        Self::answer(&self.delete, "delete_service")
    }

    async fn update_service(
        &self,
        spec: &Service,
        updates: &ServiceUpdate,
    ) -> Result<Service, OrchestratorError> {
        self.record(Call::Update(spec.clone(), updates.clone()));
        Self::answer(&self.update, "update_service")
    }
}
