//! In-memory registry

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::{CollisionRegistry, RegistryResult, RESERVED_IDS};

/// Process-local registry. Issued IDs live in a mutex-guarded set; the
/// reserved set is fixed at construction.
#[derive(Debug)]
pub struct InMemoryRegistry {
    issued: Mutex<HashSet<String>>,
    reserved: HashSet<String>,
}

impl InMemoryRegistry {
    /// Registry with the built-in reserved IDs
    pub fn new() -> Self {
        Self::with_reserved(std::iter::empty::<String>())
    }

    /// Registry with the built-in reserved IDs plus `extra`
    pub fn with_reserved<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reserved = RESERVED_IDS
            .iter()
            .map(|s| s.to_string())
            .chain(extra.into_iter().map(Into::into))
            .collect();

        InMemoryRegistry {
            issued: Mutex::new(HashSet::new()),
            reserved,
        }
    }

    /// Pre-load already issued IDs, e.g. when restoring from a snapshot.
    /// Reserved IDs are skipped. Returns how many were newly added.
    pub fn seed<I, S>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut issued = self.issued.lock();
        ids.into_iter()
            .map(Into::into)
            .filter(|id| !self.reserved.contains(id))
            .filter(|id| issued.insert(id.clone()))
            .count()
    }

    /// Sorted copy of every issued ID
    pub fn snapshot(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.issued.lock().iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of reserved IDs, built-in and extra
    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionRegistry for InMemoryRegistry {
    fn is_reserved(&self, id: &str) -> bool {
        self.reserved.contains(id)
    }

    fn contains(&self, id: &str) -> RegistryResult<bool> {
        Ok(self.issued.lock().contains(id))
    }

    fn try_register(&self, id: &str) -> RegistryResult<bool> {
        if self.is_reserved(id) {
            return Ok(false);
        }
        Ok(self.issued.lock().insert(id.to_string()))
    }

    fn len(&self) -> RegistryResult<usize> {
        Ok(self.issued.lock().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_register_once() {
        let registry = InMemoryRegistry::new();
        assert!(registry.try_register("LUKHAS1-AAAA-△-BBBB").unwrap());
        assert!(!registry.try_register("LUKHAS1-AAAA-△-BBBB").unwrap());
        assert!(registry.contains("LUKHAS1-AAAA-△-BBBB").unwrap());
        assert_eq!(registry.len().unwrap(), 1);
    }

    #[test]
    fn test_reserved_never_registered() {
        let registry = InMemoryRegistry::new();
        assert!(registry.is_reserved("Λ0-0000-○-0000"));
        assert!(!registry.try_register("Λ0-0000-○-0000").unwrap());
        assert!(!registry.contains("Λ0-0000-○-0000").unwrap());
        assert!(registry.is_empty().unwrap());
    }

    #[test]
    fn test_extra_reserved() {
        let registry = InMemoryRegistry::with_reserved(["LUKHAS3-1A2B-✨-3C4D"]);
        assert!(registry.is_reserved("LUKHAS3-1A2B-✨-3C4D"));
        assert_eq!(registry.reserved_count(), RESERVED_IDS.len() + 1);
    }

    #[test]
    fn test_seed_and_snapshot() {
        let registry = InMemoryRegistry::new();
        let added = registry.seed(["LUKHAS0-BBBB-○-0001", "LUKHAS0-AAAA-○-0001", "Λ0-0000-○-0000"]);
        assert_eq!(added, 2);
        assert_eq!(registry.seed(["LUKHAS0-AAAA-○-0001"]), 0);
        assert_eq!(
            registry.snapshot(),
            vec!["LUKHAS0-AAAA-○-0001".to_string(), "LUKHAS0-BBBB-○-0001".to_string()]
        );
    }

    #[test]
    fn test_concurrent_register_single_winner() {
        let registry = Arc::new(InMemoryRegistry::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.try_register("LUKHAS4-0C0D-💫-1E1F").unwrap())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    proptest! {
        #[test]
        fn prop_len_counts_distinct(ids in proptest::collection::vec("[A-F0-9]{4}", 0..64)) {
            let registry = InMemoryRegistry::new();
            let inserted = ids.iter().filter(|id| registry.try_register(id).unwrap()).count();
            let distinct: HashSet<&String> = ids.iter().collect();
            prop_assert_eq!(inserted, distinct.len());
            prop_assert_eq!(registry.len().unwrap(), distinct.len());
        }
    }
}
