//! AWS-oriented adapters and handlers for the file relay.
//!
//! This crate owns runtime integration details (Lambda handlers, function
//! invocation and object storage adapters) and re-exports the AWS-free
//! primitives from `relay_core` under a single `runtime` module boundary.

pub mod adapters;
pub mod handlers;
pub mod logging;

pub mod runtime {
    pub use relay_core::{config, contract, object_keys, routing};
}
