//! Multi-level Lambda ID validation
//!
//! Levels cascade: basic < standard < full < enterprise. Every check whose
//! inputs are available is evaluated regardless of the requested level;
//! the level only decides which failures make the ID invalid. Failures of
//! checks above the requested level are reported as advisory messages.
//! A string that fails the grammar skips every later check.

use std::sync::Arc;

use lambda_core::{
    is_hash_component, GenerationContext, IdPrefix, LambdaId, RawParts, TierLevel,
    ValidationLevel,
};
use lambda_entropy::{analyze_entropy, EntropyAnalysis};
use lambda_registry::CollisionRegistry;
use serde::Serialize;
use tracing::debug;

use crate::{enterprise_violations, EnterprisePolicy, RegistryExpectation, ValidationContext};

/// Outcome of validating one candidate string. Always fully populated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationResult {
    pub id: String,
    pub level: ValidationLevel,
    /// Overall verdict at the requested level
    pub valid: bool,
    /// Grammar match
    pub format_valid: bool,
    /// Symbol allowed by the tier, hash components well-formed
    pub tier_compliant: bool,
    /// Not reserved, and registry membership matches the caller's expectation
    pub collision_free: bool,
    /// Entropy score reaches the tier minimum
    pub entropy_valid: bool,
    /// No enterprise rule violated
    pub enterprise_compliant: bool,
    pub tier: Option<TierLevel>,
    pub entropy: Option<EntropyAnalysis>,
    /// Failures at or below the requested level first appear plainly;
    /// deeper failures are prefixed with `advisory`
    pub messages: Vec<String>,
}

impl ValidationResult {
    fn malformed(id: &str, level: ValidationLevel, messages: Vec<String>) -> Self {
        ValidationResult {
            id: id.to_string(),
            level,
            valid: false,
            format_valid: false,
            tier_compliant: false,
            collision_free: false,
            entropy_valid: false,
            enterprise_compliant: false,
            tier: None,
            entropy: None,
            messages,
        }
    }
}

/// Collects messages, tagging those above the requested level
struct Messages {
    level: ValidationLevel,
    out: Vec<String>,
}

impl Messages {
    fn new(level: ValidationLevel) -> Self {
        Messages {
            level,
            out: Vec::new(),
        }
    }

    fn fail(&mut self, check: ValidationLevel, message: impl Into<String>) {
        let message = message.into();
        if self.level.includes(check) {
            self.out.push(message);
        } else {
            self.out.push(format!("advisory ({}): {}", check.name(), message));
        }
    }
}

/// Validates candidate ID strings against the tier table, the registry
/// and the entropy analyzer
pub struct LambdaIdValidator {
    registry: Arc<dyn CollisionRegistry>,
    policy: EnterprisePolicy,
}

impl LambdaIdValidator {
    pub fn new(registry: Arc<dyn CollisionRegistry>) -> Self {
        LambdaIdValidator {
            registry,
            policy: EnterprisePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: EnterprisePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &EnterprisePolicy {
        &self.policy
    }

    pub fn is_reserved(&self, id: &str) -> bool {
        self.registry.is_reserved(id)
    }

    /// Validate with an untyped context map (keys `registry`, `geo_code`,
    /// `commercial`, `checksum`)
    pub fn validate(
        &self,
        id: &str,
        level: ValidationLevel,
        context: Option<&GenerationContext>,
    ) -> ValidationResult {
        let ctx = context.map(ValidationContext::from_map).unwrap_or_default();
        self.validate_with(id, level, &ctx)
    }

    /// Validate at the level the ID's own tier calls for. Strings that do
    /// not parse are validated at the basic level.
    pub fn validate_for_tier(&self, id: &str, context: Option<&GenerationContext>) -> ValidationResult {
        let level = LambdaId::parse(id)
            .map(|parsed| parsed.tier().spec().validation_rigor.minimum_level())
            .unwrap_or(ValidationLevel::Basic);
        self.validate(id, level, context)
    }

    pub fn validate_with(
        &self,
        id: &str,
        level: ValidationLevel,
        ctx: &ValidationContext,
    ) -> ValidationResult {
        let result = self.run_checks(id, level, ctx);
        debug!(
            level = level.name(),
            valid = result.valid,
            format_valid = result.format_valid,
            issues = result.messages.len(),
            "validated lambda id"
        );
        result
    }

    fn run_checks(&self, id: &str, level: ValidationLevel, ctx: &ValidationContext) -> ValidationResult {
        let mut messages = Messages::new(level);

        // Basic: reservation is checked before the grammar so that no level
        // can pass a reserved string
        let reserved = self.registry.is_reserved(id);
        if reserved {
            messages.fail(ValidationLevel::Basic, "ID is reserved");
        }

        let parsed = match LambdaId::parse(id) {
            Ok(parsed) => parsed,
            Err(_) => {
                messages.fail(ValidationLevel::Basic, "ID does not match the Lambda ID grammar");
                for reason in format_diagnostics(id) {
                    messages.fail(ValidationLevel::Basic, reason);
                }
                return ValidationResult::malformed(id, level, messages.out);
            }
        };

        // Standard
        let tier = parsed.tier();
        let spec = tier.spec();
        let mut tier_compliant = true;
        if !spec.allows(parsed.symbol()) {
            tier_compliant = false;
            messages.fail(
                ValidationLevel::Standard,
                format!("symbol {:?} is not allowed at tier {}", parsed.symbol(), tier),
            );
        }
        for (name, component) in [
            ("timestamp", parsed.timestamp_hash()),
            ("entropy", parsed.entropy_hash()),
        ] {
            if !is_hash_component(component) {
                tier_compliant = false;
                messages.fail(
                    ValidationLevel::Standard,
                    format!("{name} hash {component:?} is not four upper-case hex characters"),
                );
            }
        }

        // Full
        let mut collision_free = !reserved;
        match self.registry_check(id, ctx.registry) {
            Ok(()) => {}
            Err(reason) => {
                collision_free = false;
                messages.fail(ValidationLevel::Full, reason);
            }
        }

        let analysis = analyze_entropy(id);
        let entropy_valid = analysis.meets_tier(tier);
        if !entropy_valid {
            messages.fail(
                ValidationLevel::Full,
                format!(
                    "entropy score {:.3} is below the tier {} minimum of {:.1}",
                    analysis.total_score, tier, spec.min_entropy_score
                ),
            );
        }

        // Enterprise
        let violations = enterprise_violations(&parsed, ctx, &self.policy);
        let enterprise_compliant = violations.is_empty();
        for violation in violations {
            messages.fail(ValidationLevel::Enterprise, violation);
        }

        let valid = !reserved
            && (!level.includes(ValidationLevel::Standard) || tier_compliant)
            && (!level.includes(ValidationLevel::Full) || (collision_free && entropy_valid))
            && (!level.includes(ValidationLevel::Enterprise) || enterprise_compliant);

        ValidationResult {
            id: id.to_string(),
            level,
            valid,
            format_valid: true,
            tier_compliant,
            collision_free,
            entropy_valid,
            enterprise_compliant,
            tier: Some(tier),
            entropy: Some(analysis),
            messages: messages.out,
        }
    }

    /// Membership check for the caller's expectation. The registry is not
    /// consulted at all for `Ignore`.
    fn registry_check(&self, id: &str, expectation: RegistryExpectation) -> Result<(), String> {
        let issued = match expectation {
            RegistryExpectation::Ignore => return Ok(()),
            RegistryExpectation::Issued | RegistryExpectation::Unissued => self
                .registry
                .contains(id)
                .map_err(|err| format!("registry check failed: {err}"))?,
        };

        match (expectation, issued) {
            (RegistryExpectation::Issued, false) => Err("ID was not issued by this registry".to_string()),
            (RegistryExpectation::Unissued, true) => Err("ID collides with an issued ID".to_string()),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Debug for LambdaIdValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LambdaIdValidator")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Explain why `id` failed the grammar, field by field
fn format_diagnostics(id: &str) -> Vec<String> {
    let Some(parts) = RawParts::split(id) else {
        return vec!["expected PREFIX{tier}-{hash}-{symbol}-{hash}".to_string()];
    };

    let mut out = Vec::new();
    if IdPrefix::from_str_exact(parts.prefix).is_none() {
        out.push(format!("prefix {:?} is neither LUKHAS nor Λ", parts.prefix));
    }
    match parts.tier.parse::<u8>() {
        Ok(digit) if TierLevel::from_digit(digit).is_some() => {}
        Ok(digit) => out.push(format!("tier {digit} is outside 0..=5")),
        Err(_) => out.push(format!("tier {:?} is not a digit", parts.tier)),
    }
    for (name, component) in [
        ("timestamp", parts.timestamp_hash),
        ("entropy", parts.entropy_hash),
    ] {
        if !is_hash_component(component) {
            out.push(format!("{name} hash {component:?} is not four upper-case hex characters"));
        }
    }
    if parts.symbol.chars().count() != 1 {
        out.push(format!("symbol {:?} is not a single character", parts.symbol));
    }
    out
}
