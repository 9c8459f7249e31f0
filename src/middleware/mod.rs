//! HTTP middlewares applied around every route.

pub mod middleware;
pub mod recover_middleware;
pub mod trace_middleware;
