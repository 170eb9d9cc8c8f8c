//! Entropy component

use chrono::{SecondsFormat, Utc};
use lambda_core::{GenerationContext, TierLevel};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::digest_prefix;

/// Bytes of OS randomness folded into every entropy hash
pub const RANDOM_BYTES: usize = 16;

/// Derives the 4-hex entropy component
#[derive(Clone, Copy, Debug, Default)]
pub struct EntropyHasher;

impl EntropyHasher {
    pub fn new() -> Self {
        EntropyHasher
    }

    /// Hash fresh OS randomness, the optional context and a tier+time salt
    pub fn hash(&self, tier: TierLevel, context: Option<&GenerationContext>) -> String {
        let mut random = [0u8; RANDOM_BYTES];
        OsRng.fill_bytes(&mut random);
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        Self::hash_material(&random, tier, context, &timestamp)
    }

    /// Deterministic core of [`EntropyHasher::hash`]:
    /// `SHA-256(random || canonical(context) || "{tier}:{timestamp}")`,
    /// first four hex characters, upper-cased.
    pub fn hash_material(
        random: &[u8; RANDOM_BYTES],
        tier: TierLevel,
        context: Option<&GenerationContext>,
        timestamp: &str,
    ) -> String {
        let mut material = random.to_vec();
        if let Some(ctx) = context {
            material.extend_from_slice(&ctx.canonical_bytes());
        }
        material.extend_from_slice(format!("{}:{}", tier.digit(), timestamp).as_bytes());
        digest_prefix(&material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_core::is_hash_component;

    const TS: &str = "2026-01-01T00:00:00.000000Z";

    #[test]
    fn test_material_is_concatenated_digest() {
        let random = [8u8; RANDOM_BYTES];
        let ctx = GenerationContext::new().with("email", "a@b.com");

        let mut material = random.to_vec();
        material.extend_from_slice(&ctx.canonical_bytes());
        material.extend_from_slice(format!("2:{TS}").as_bytes());

        assert_eq!(
            EntropyHasher::hash_material(&random, TierLevel::Friend, Some(&ctx), TS),
            digest_prefix(&material)
        );
    }

    #[test]
    fn test_material_is_deterministic() {
        let random = [7u8; RANDOM_BYTES];
        let a = EntropyHasher::hash_material(&random, TierLevel::Trusted, None, TS);
        let b = EntropyHasher::hash_material(&random, TierLevel::Trusted, None, TS);
        assert_eq!(a, b);
        assert!(is_hash_component(&a));
    }

    #[test]
    fn test_salt_inputs_change_hash() {
        let random = [7u8; RANDOM_BYTES];
        let ctx = GenerationContext::new().with("email", "a@b.com");
        let base = EntropyHasher::hash_material(&random, TierLevel::Guest, None, TS);
        assert_eq!(base, "2C36");

        let inputs = [
            EntropyHasher::hash_material(&random, TierLevel::Visitor, None, TS),
            EntropyHasher::hash_material(&random, TierLevel::Guest, Some(&ctx), TS),
            EntropyHasher::hash_material(&[8u8; RANDOM_BYTES], TierLevel::Guest, None, TS),
        ];
        assert_eq!(inputs, ["0BC9", "0002", "EF19"]);
    }

    #[test]
    fn test_context_key_order_irrelevant() {
        let random = [1u8; RANDOM_BYTES];
        let a = GenerationContext::new().with("a", 1).with("b", 2);
        let b = GenerationContext::new().with("b", 2).with("a", 1);
        assert_eq!(
            EntropyHasher::hash_material(&random, TierLevel::Friend, Some(&a), TS),
            EntropyHasher::hash_material(&random, TierLevel::Friend, Some(&b), TS),
        );
    }

    #[test]
    fn test_live_hash_shape() {
        let hasher = EntropyHasher::new();
        for tier in TierLevel::all() {
            assert!(is_hash_component(&hasher.hash(*tier, None)));
        }
    }
}
