//! Lambda ID generator

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use lambda_core::{
    GenerationContext, IdPrefix, LambdaId, TierLevel, ValidationRigor, KEY_COLLISION_RETRY,
    KEY_RETRY_TIMESTAMP,
};
use lambda_crypto::{ComponentSource, SecureComponents};
use lambda_entropy::analyze_entropy;
use lambda_registry::CollisionRegistry;
use tracing::{debug, warn};

use crate::{
    EngineConfig, GenerationError, GenerationResult, GenerationStats, GenerationStatsSnapshot,
    DEFAULT_MAX_RETRIES,
};

/// Successful generation plus how many retries it took
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub id: LambdaId,
    /// Attempts beyond the first; never exceeds the configured maximum
    pub retries: u32,
}

/// Why a candidate was thrown away
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rejection {
    Malformed,
    Reserved,
    Weak,
    Collision,
}

/// Builds unique IDs and registers them
pub struct LambdaIdGenerator {
    registry: Arc<dyn CollisionRegistry>,
    components: Arc<dyn ComponentSource>,
    max_retries: u32,
    enforce_entropy_floor: bool,
    stats: GenerationStats,
}

impl LambdaIdGenerator {
    /// Generator backed by the clock and OS RNG, default retry budget
    pub fn new(registry: Arc<dyn CollisionRegistry>) -> Self {
        LambdaIdGenerator {
            registry,
            components: Arc::new(SecureComponents::new()),
            max_retries: DEFAULT_MAX_RETRIES,
            enforce_entropy_floor: false,
            stats: GenerationStats::new(),
        }
    }

    pub fn from_config(registry: Arc<dyn CollisionRegistry>, config: &EngineConfig) -> Self {
        Self::new(registry)
            .with_max_retries(config.max_retries)
            .with_entropy_floor(config.enforce_entropy_floor)
    }

    /// Replace the component source (tests script exact candidates this way)
    pub fn with_components(mut self, components: Arc<dyn ComponentSource>) -> Self {
        self.components = components;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_entropy_floor(mut self, enforce: bool) -> Self {
        self.enforce_entropy_floor = enforce;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn registry(&self) -> &Arc<dyn CollisionRegistry> {
        &self.registry
    }

    pub fn stats(&self) -> GenerationStatsSnapshot {
        self.stats.snapshot()
    }

    /// Generate and register a new ID for `tier`.
    ///
    /// Tiers with cryptographic validation rigor always retry candidates
    /// scoring below their entropy minimum, so every issued ID passes its
    /// own tier's full validation. Lower tiers only do so when the entropy
    /// floor is enabled.
    pub fn generate(
        &self,
        tier: TierLevel,
        context: Option<&GenerationContext>,
        preference: Option<char>,
    ) -> GenerationResult<LambdaId> {
        self.generate_with_outcome(tier, context, preference)
            .map(|outcome| outcome.id)
    }

    /// Like [`LambdaIdGenerator::generate`], also reporting the retry count
    pub fn generate_with_outcome(
        &self,
        tier: TierLevel,
        context: Option<&GenerationContext>,
        preference: Option<char>,
    ) -> GenerationResult<GenerationOutcome> {
        let mut context = context.cloned();

        for attempt in 0..=self.max_retries {
            let candidate = match self.build_candidate(tier, context.as_ref(), preference) {
                Ok(candidate) => candidate,
                Err(rejection) => {
                    self.reject(rejection, tier, attempt, None);
                    mark_retry(&mut context);
                    continue;
                }
            };

            if self.registry.is_reserved(candidate.as_str()) {
                self.reject(Rejection::Reserved, tier, attempt, Some(&candidate));
                mark_retry(&mut context);
                continue;
            }

            if self.floor_applies(tier) && !analyze_entropy(candidate.as_str()).meets_tier(tier) {
                self.reject(Rejection::Weak, tier, attempt, Some(&candidate));
                mark_retry(&mut context);
                continue;
            }

            match self.registry.try_register(candidate.as_str()) {
                Ok(true) => {
                    self.stats.record_success(attempt);
                    debug!(tier = tier.digit(), retries = attempt, "issued lambda id");
                    return Ok(GenerationOutcome {
                        id: candidate,
                        retries: attempt,
                    });
                }
                Ok(false) => {
                    self.reject(Rejection::Collision, tier, attempt, Some(&candidate));
                    mark_retry(&mut context);
                }
                Err(err) => {
                    self.stats.record_failure();
                    warn!(tier = tier.digit(), error = %err, "registry unavailable, refusing to issue");
                    return Err(err.into());
                }
            }
        }

        self.stats.record_failure();
        warn!(
            tier = tier.digit(),
            max_retries = self.max_retries,
            "gave up generating lambda id"
        );
        Err(GenerationError::MaxRetriesExceeded {
            max_retries: self.max_retries,
        })
    }

    /// Generate `count` IDs for the same tier, stopping at the first error
    pub fn generate_batch(
        &self,
        tier: TierLevel,
        count: usize,
        context: Option<&GenerationContext>,
    ) -> GenerationResult<Vec<LambdaId>> {
        (0..count)
            .map(|_| self.generate(tier, context, None))
            .collect()
    }

    fn floor_applies(&self, tier: TierLevel) -> bool {
        self.enforce_entropy_floor
            || tier.spec().validation_rigor == ValidationRigor::Cryptographic
    }

    fn build_candidate(
        &self,
        tier: TierLevel,
        context: Option<&GenerationContext>,
        preference: Option<char>,
    ) -> Result<LambdaId, Rejection> {
        let timestamp_hash = self.components.timestamp_hash();
        let symbol = self.components.symbol(tier, preference);
        let entropy_hash = self.components.entropy_hash(tier, context);

        if !tier.spec().allows(symbol) {
            return Err(Rejection::Malformed);
        }

        LambdaId::new(IdPrefix::Lukhas, tier, &timestamp_hash, symbol, &entropy_hash)
            .map_err(|_| Rejection::Malformed)
    }

    fn reject(&self, rejection: Rejection, tier: TierLevel, attempt: u32, candidate: Option<&LambdaId>) {
        match rejection {
            Rejection::Malformed => self.stats.record_malformed(),
            Rejection::Reserved => self.stats.record_reserved(),
            Rejection::Weak => self.stats.record_weak(),
            Rejection::Collision => self.stats.record_collision(),
        }

        let candidate = candidate.map(LambdaId::as_str).unwrap_or("<malformed>");
        if rejection == Rejection::Malformed {
            warn!(tier = tier.digit(), attempt, "component source produced a malformed candidate");
        } else {
            debug!(tier = tier.digit(), attempt, candidate, ?rejection, "rejected candidate, retrying");
        }
    }
}

impl std::fmt::Debug for LambdaIdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LambdaIdGenerator")
            .field("max_retries", &self.max_retries)
            .field("enforce_entropy_floor", &self.enforce_entropy_floor)
            .finish_non_exhaustive()
    }
}

/// Flag the context so the next entropy hash is salted differently
fn mark_retry(context: &mut Option<GenerationContext>) {
    let ctx = context.get_or_insert_with(GenerationContext::new);
    ctx.insert(KEY_COLLISION_RETRY, true);
    ctx.insert(
        KEY_RETRY_TIMESTAMP,
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    );
}
