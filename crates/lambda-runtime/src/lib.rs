//! Lambda ID Runtime - Generation, validation and the engine facade
//!
//! This crate wires the leaf crates together:
//! 1. Derive timestamp hash, symbol and entropy hash
//! 2. Assemble a candidate ID
//! 3. Reject reserved, weak or colliding candidates and retry (bounded)
//! 4. Atomically register the winner
//!
//! Validation runs four cascading levels (basic, standard, full,
//! enterprise) and always returns a fully populated result.

pub mod config;
pub mod engine;
pub mod enterprise;
pub mod error;
pub mod generator;
pub mod stats;
pub mod telemetry;
pub mod validator;

pub use config::*;
pub use engine::*;
pub use enterprise::*;
pub use error::*;
pub use generator::*;
pub use stats::*;
pub use telemetry::*;
pub use validator::*;
