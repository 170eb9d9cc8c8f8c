//! Lambda ID Registry - Uniqueness tracking for issued IDs
//!
//! The registry is the only shared mutable state in the engine. It holds:
//! - Every ID issued so far (insert-only during normal operation)
//! - A fixed set of reserved IDs that are never issued
//!
//! Backends implement [`CollisionRegistry`]. The in-memory default guards
//! its set with a mutex so check-and-insert is a single atomic step.

pub mod error;
pub mod memory;
pub mod reserved;

pub use error::*;
pub use memory::*;
pub use reserved::*;

/// Storage of issued IDs.
///
/// Implementations must make [`CollisionRegistry::try_register`] atomic: two
/// threads racing on the same string cannot both observe `Ok(true)`.
pub trait CollisionRegistry: Send + Sync {
    /// Is `id` permanently excluded from issuance?
    fn is_reserved(&self, id: &str) -> bool;

    /// Has `id` already been issued?
    fn contains(&self, id: &str) -> RegistryResult<bool>;

    /// Insert `id` if it is neither reserved nor present.
    /// Returns `Ok(true)` when this call inserted it.
    fn try_register(&self, id: &str) -> RegistryResult<bool>;

    /// Number of issued IDs
    fn len(&self) -> RegistryResult<usize>;

    fn is_empty(&self) -> RegistryResult<bool> {
        Ok(self.len()? == 0)
    }
}
