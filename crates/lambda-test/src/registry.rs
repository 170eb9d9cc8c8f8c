//! Registries that fail on demand

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use lambda_registry::{CollisionRegistry, InMemoryRegistry, RegistryError, RegistryResult};

/// Every storage call fails. Reservation checks still answer from the
/// built-in set, as they need no backend.
#[derive(Clone, Debug)]
pub struct UnavailableRegistry {
    reason: String,
}

impl UnavailableRegistry {
    pub fn new(reason: impl Into<String>) -> Self {
        UnavailableRegistry {
            reason: reason.into(),
        }
    }

    fn err<T>(&self) -> RegistryResult<T> {
        Err(RegistryError::Unavailable(self.reason.clone()))
    }
}

impl Default for UnavailableRegistry {
    fn default() -> Self {
        Self::new("registry offline")
    }
}

impl CollisionRegistry for UnavailableRegistry {
    fn is_reserved(&self, id: &str) -> bool {
        lambda_registry::is_builtin_reserved(id)
    }

    fn contains(&self, _id: &str) -> RegistryResult<bool> {
        self.err()
    }

    fn try_register(&self, _id: &str) -> RegistryResult<bool> {
        self.err()
    }

    fn len(&self) -> RegistryResult<usize> {
        self.err()
    }
}

/// In-memory registry with an outage switch and an optional budget of
/// failing calls
#[derive(Debug, Default)]
pub struct FlakyRegistry {
    inner: InMemoryRegistry,
    down: AtomicBool,
    failures_left: AtomicUsize,
    failed_calls: AtomicUsize,
}

impl FlakyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` storage calls, then recover
    pub fn failing_next(count: usize) -> Self {
        let registry = Self::new();
        registry.failures_left.store(count, Ordering::SeqCst);
        registry
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Storage calls that returned an error so far
    pub fn failed_calls(&self) -> usize {
        self.failed_calls.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &InMemoryRegistry {
        &self.inner
    }

    fn check(&self) -> RegistryResult<()> {
        let budget = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if budget || self.down.load(Ordering::SeqCst) {
            self.failed_calls.fetch_add(1, Ordering::SeqCst);
            return Err(RegistryError::Unavailable("injected outage".to_string()));
        }
        Ok(())
    }
}

impl CollisionRegistry for FlakyRegistry {
    fn is_reserved(&self, id: &str) -> bool {
        self.inner.is_reserved(id)
    }

    fn contains(&self, id: &str) -> RegistryResult<bool> {
        self.check()?;
        self.inner.contains(id)
    }

    fn try_register(&self, id: &str) -> RegistryResult<bool> {
        self.check()?;
        self.inner.try_register(id)
    }

    fn len(&self) -> RegistryResult<usize> {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_still_knows_reserved() {
        let registry = UnavailableRegistry::default();
        assert!(registry.is_reserved("Λ0-0000-○-0000"));
        assert!(registry.contains("LUKHAS2-A1B2-🌀-C3D4").is_err());
        assert!(registry.is_empty().is_err());
    }

    #[test]
    fn test_flaky_budget_then_recovery() {
        let registry = FlakyRegistry::failing_next(2);
        assert!(registry.try_register("LUKHAS2-A1B2-🌀-C3D4").is_err());
        assert!(registry.contains("LUKHAS2-A1B2-🌀-C3D4").is_err());
        assert_eq!(registry.try_register("LUKHAS2-A1B2-🌀-C3D4"), Ok(true));
        assert_eq!(registry.failed_calls(), 2);
    }

    #[test]
    fn test_flaky_switch() {
        let registry = FlakyRegistry::new();
        registry.set_down(true);
        assert!(registry.try_register("LUKHAS2-A1B2-🌀-C3D4").is_err());
        registry.set_down(false);
        assert_eq!(registry.try_register("LUKHAS2-A1B2-🌀-C3D4"), Ok(true));
        assert_eq!(registry.contains("LUKHAS2-A1B2-🌀-C3D4"), Ok(true));
    }
}
