//! Timestamp component

use chrono::Utc;

use crate::digest_prefix;

/// Derives the 4-hex timestamp component from the wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct TimestampHasher;

impl TimestampHasher {
    pub fn new() -> Self {
        TimestampHasher
    }

    /// Hash the current time at millisecond resolution
    pub fn hash_now(&self) -> String {
        Self::hash_millis(Utc::now().timestamp_millis())
    }

    /// Hash a specific millisecond timestamp. SHA-256 over its decimal
    /// representation, first four hex characters, upper-cased.
    pub fn hash_millis(millis: i64) -> String {
        digest_prefix(millis.to_string().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_core::is_hash_component;
    use proptest::prelude::*;

    #[test]
    fn test_known_vector() {
        // sha256("0") = 5feceb66...
        assert_eq!(TimestampHasher::hash_millis(0), "5FEC");
    }

    #[test]
    fn test_deterministic_for_same_millis() {
        let a = TimestampHasher::hash_millis(1_700_000_000_123);
        let b = TimestampHasher::hash_millis(1_700_000_000_123);
        assert_eq!(a, b);
        assert_ne!(a, TimestampHasher::hash_millis(1_700_000_000_124));
    }

    #[test]
    fn test_now_is_hash_component() {
        assert!(is_hash_component(&TimestampHasher::new().hash_now()));
    }

    proptest! {
        #[test]
        fn prop_any_millis_hashes_to_component(millis in any::<i64>()) {
            prop_assert!(is_hash_component(&TimestampHasher::hash_millis(millis)));
        }
    }
}
