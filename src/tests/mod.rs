//! In-process tests of the bridge router.
//!
//! Every case drives the assembled router through tower's `oneshot`, with the
//! orchestrator and the function transport replaced by recording doubles.

mod cases_replicas_test;
mod cases_routing_test;

pub mod support;
