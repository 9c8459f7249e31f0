#[allow(clippy::module_inception)]
mod server;

pub use server::HttpServer;
