//! Shared test support code: orchestrator and transport doubles, fixtures and the router harness.

pub mod bridge;
pub mod doer;
pub mod fixtures;
pub mod harness;

pub use bridge::{remote_error, Call, MockBridgeClient};
pub use doer::{RecordedRequest, ScriptedDoer};
pub use fixtures::{foreign_service, managed_service, service_in_state};
pub use harness::{router, send, send_request, TestResponse};
