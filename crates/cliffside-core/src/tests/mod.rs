//! Scenario, determinism and property tests for the full controller.
//!
//! # Test Structure
//!
//! - `helpers.rs`: level builders, a tick harness and an editable world
//! - `integration.rs`: end-to-end movement scenarios through [`Controller::tick`](crate::Controller::tick)
//! - `determinism.rs`: identical inputs must give identical state hashes

mod determinism;
mod helpers;

// Re-export for convenience
pub use helpers::*;
