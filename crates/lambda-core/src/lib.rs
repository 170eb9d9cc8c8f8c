//! Lambda ID Core - Fundamental types for the ΛiD identifier format
//!
//! This crate defines the types shared by every other Lambda ID crate:
//! - Identifiers (`LambdaId`, `IdPrefix`)
//! - Tier table (`TierLevel`, `TierSpec`, `ValidationRigor`)
//! - Validation levels
//! - Caller-supplied generation context
//! - Core error types

pub mod context;
pub mod error;
pub mod id;
pub mod tier;

pub use context::*;
pub use error::*;
pub use id::*;
pub use tier::*;
