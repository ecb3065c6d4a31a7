//! Shared file relay primitives.
//!
//! This crate owns target routing, response contracts, object naming and
//! environment configuration. It intentionally excludes AWS SDK and Lambda
//! runtime concerns, which live in `relay_lambda`.

pub mod config;
pub mod contract;
pub mod object_keys;
pub mod routing;
