//! HTTP module: server, client, path rules and replies.

pub mod client;
pub mod response;
pub mod server;
pub mod vars;

pub use crate::middleware::middleware::Middleware;

// Re-export server types
pub use server::HttpServer;

// Common controller interface
pub use crate::controller::controller::Controller;
