// src/dag/mod.rs

//! Dependency planning.
//!
//! - [`plan`] computes the deduplicated, dependency-respecting execution
//!   order for one request and rejects cyclic graphs before anything runs.

pub mod plan;

pub use plan::ExecutionPlan;
