//! Lambda ID engine - generator, validator and analyzer behind one handle

use std::sync::Arc;

use lambda_core::{GenerationContext, LambdaId, TierLevel, ValidationLevel};
use lambda_crypto::{checksum, ComponentSource};
use lambda_entropy::{analyze_entropy, EntropyAnalysis};
use lambda_registry::{CollisionRegistry, InMemoryRegistry};
use tracing::info;

use crate::{
    ConfigError, EngineConfig, GenerationOutcome, GenerationResult, GenerationStatsSnapshot,
    LambdaIdGenerator, LambdaIdValidator, ValidationResult,
};

/// Shares one registry between generation and validation.
///
/// The engine is `Send + Sync`; wrap it in an `Arc` to call it from
/// several threads.
pub struct LambdaEngine {
    config: EngineConfig,
    registry: Arc<dyn CollisionRegistry>,
    generator: LambdaIdGenerator,
    validator: LambdaIdValidator,
}

impl LambdaEngine {
    /// Engine over a fresh in-memory registry. Extra reserved IDs from the
    /// configuration are added to the built-in set.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = Arc::new(InMemoryRegistry::with_reserved(
            config.extra_reserved_ids.iter().cloned(),
        ));
        Ok(Self::assemble(config, registry))
    }

    /// Engine over a caller-supplied registry backend
    pub fn with_registry(
        config: EngineConfig,
        registry: Arc<dyn CollisionRegistry>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, registry))
    }

    fn assemble(config: EngineConfig, registry: Arc<dyn CollisionRegistry>) -> Self {
        let generator = LambdaIdGenerator::from_config(registry.clone(), &config);
        let validator =
            LambdaIdValidator::new(registry.clone()).with_policy(config.enterprise.clone());

        info!(
            max_retries = config.max_retries,
            enforce_entropy_floor = config.enforce_entropy_floor,
            extra_reserved = config.extra_reserved_ids.len(),
            "lambda id engine ready"
        );

        LambdaEngine {
            config,
            registry,
            generator,
            validator,
        }
    }

    /// Swap the component source used for new IDs
    pub fn with_components(mut self, components: Arc<dyn ComponentSource>) -> Self {
        self.generator = self.generator.with_components(components);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<dyn CollisionRegistry> {
        &self.registry
    }

    pub fn generate(
        &self,
        tier: TierLevel,
        context: Option<&GenerationContext>,
        symbol_preference: Option<char>,
    ) -> GenerationResult<LambdaId> {
        self.generator.generate(tier, context, symbol_preference)
    }

    pub fn generate_with_outcome(
        &self,
        tier: TierLevel,
        context: Option<&GenerationContext>,
        symbol_preference: Option<char>,
    ) -> GenerationResult<GenerationOutcome> {
        self.generator
            .generate_with_outcome(tier, context, symbol_preference)
    }

    pub fn generate_batch(
        &self,
        tier: TierLevel,
        count: usize,
        context: Option<&GenerationContext>,
    ) -> GenerationResult<Vec<LambdaId>> {
        self.generator.generate_batch(tier, count, context)
    }

    pub fn validate(
        &self,
        id: &str,
        level: ValidationLevel,
        context: Option<&GenerationContext>,
    ) -> ValidationResult {
        self.validator.validate(id, level, context)
    }

    /// Validate at the level the ID's tier calls for
    pub fn validate_for_tier(&self, id: &str, context: Option<&GenerationContext>) -> ValidationResult {
        self.validator.validate_for_tier(id, context)
    }

    pub fn analyze_entropy(&self, id: &str) -> EntropyAnalysis {
        analyze_entropy(id)
    }

    pub fn is_reserved(&self, id: &str) -> bool {
        self.registry.is_reserved(id)
    }

    /// Checksum to hand out alongside an issued ID
    pub fn checksum(&self, id: &LambdaId) -> String {
        checksum(id.as_str())
    }

    pub fn stats(&self) -> GenerationStatsSnapshot {
        self.generator.stats()
    }
}

impl std::fmt::Debug for LambdaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LambdaEngine")
            .field("config", &self.config)
            .field("generator", &self.generator)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_then_validate() {
        let engine = LambdaEngine::new(EngineConfig::default()).unwrap();
        let ctx = GenerationContext::new().with("registry", "issued");

        for &tier in TierLevel::all() {
            let id = engine.generate(tier, None, None).unwrap();
            let result = engine.validate(id.as_str(), ValidationLevel::Standard, Some(&ctx));
            assert!(result.valid, "{id}: {:?}", result.messages);
            assert_eq!(result.tier, Some(tier));
        }

        let stats = engine.stats();
        assert_eq!(stats.generated, 6);
        assert_eq!(engine.registry().len().unwrap(), 6);
    }

    #[test]
    fn test_extra_reserved_from_config() {
        let config = EngineConfig {
            extra_reserved_ids: vec!["LUKHAS1-1111-△-2222".to_string()],
            ..EngineConfig::default()
        };
        let engine = LambdaEngine::new(config).unwrap();
        assert!(engine.is_reserved("LUKHAS1-1111-△-2222"));
        assert!(engine.is_reserved("Λ0-0000-○-0000"));
        assert!(!engine.validate("LUKHAS1-1111-△-2222", ValidationLevel::Basic, None).valid);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            max_retries: 1000,
            ..EngineConfig::default()
        };
        assert!(matches!(LambdaEngine::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_checksum_validates_at_enterprise() {
        let engine = LambdaEngine::new(EngineConfig::default()).unwrap();
        let id = engine.generate(TierLevel::Trusted, None, Some('✨')).unwrap();
        assert_eq!(id.symbol(), '✨');

        let ctx = GenerationContext::new()
            .with("commercial", true)
            .with("checksum", engine.checksum(&id));
        let result = engine.validate(id.as_str(), ValidationLevel::Enterprise, Some(&ctx));
        assert!(result.enterprise_compliant, "{:?}", result.messages);
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LambdaEngine>();
    }
}
