//! Component source seam used by the generator

use lambda_core::{GenerationContext, TierLevel};

use crate::{EntropyHasher, SymbolSelector, TimestampHasher};

/// Produces the three variable fields of a candidate ID.
///
/// Production code uses [`SecureComponents`]. Tests substitute a scripted
/// source to force exact candidates.
pub trait ComponentSource: Send + Sync {
    fn timestamp_hash(&self) -> String;

    fn symbol(&self, tier: TierLevel, preference: Option<char>) -> char;

    fn entropy_hash(&self, tier: TierLevel, context: Option<&GenerationContext>) -> String;
}

/// Clock + OS RNG backed components
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureComponents {
    timestamps: TimestampHasher,
    symbols: SymbolSelector,
    entropy: EntropyHasher,
}

impl SecureComponents {
    pub fn new() -> Self {
        SecureComponents::default()
    }
}

impl ComponentSource for SecureComponents {
    fn timestamp_hash(&self) -> String {
        self.timestamps.hash_now()
    }

    fn symbol(&self, tier: TierLevel, preference: Option<char>) -> char {
        self.symbols.select(tier, preference)
    }

    fn entropy_hash(&self, tier: TierLevel, context: Option<&GenerationContext>) -> String {
        self.entropy.hash(tier, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_core::{is_hash_component, IdPrefix, LambdaId};

    #[test]
    fn test_secure_components_assemble_valid_id() {
        let source = SecureComponents::new();
        let ctx = GenerationContext::new().with("email", "a@b.com");
        let id = LambdaId::new(
            IdPrefix::Lukhas,
            TierLevel::Friend,
            &source.timestamp_hash(),
            source.symbol(TierLevel::Friend, Some('🌀')),
            &source.entropy_hash(TierLevel::Friend, Some(&ctx)),
        )
        .unwrap();

        assert!(id.as_str().starts_with("LUKHAS2-"));
        assert_eq!(id.symbol(), '🌀');
        assert!(is_hash_component(id.timestamp_hash()));
    }

    #[test]
    fn test_trait_object_usable() {
        let source: Box<dyn ComponentSource> = Box::new(SecureComponents::new());
        assert!(TierLevel::Trusted
            .spec()
            .allows(source.symbol(TierLevel::Trusted, None)));
    }
}
