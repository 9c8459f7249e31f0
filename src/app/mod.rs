//! Application assembly.

#[allow(clippy::module_inception)]
mod app;
pub mod server;

pub use app::App;
