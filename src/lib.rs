#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod app;
pub mod config;
pub mod controller;
pub mod http;
pub mod metrics;
pub mod middleware;
pub mod model;
pub mod rancher;
pub mod shutdown;
pub mod upstream;
