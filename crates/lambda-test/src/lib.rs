//! Lambda ID Test Harness - Failure injection and load drivers
//!
//! This crate provides:
//! - Scripted and seeded component sources
//! - Registries that fail on demand
//! - Multi-threaded generation drivers with uniqueness reports

pub mod components;
pub mod harness;
pub mod registry;

pub use components::*;
pub use harness::*;
pub use registry::*;
