//! Outbound HTTP: the transport capability and function-invocation helpers.

pub mod doer;
pub mod proxy;



// Re-export main types
pub use doer::{HttpDoer, HyperDoer, TransportError};
