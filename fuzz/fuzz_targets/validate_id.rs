#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lambda_core::{GenerationContext, ValidationLevel};
use lambda_registry::InMemoryRegistry;
use lambda_runtime::LambdaIdValidator;

/// Candidate assembled from parts so most inputs land near the grammar
#[derive(Debug, Arbitrary)]
struct Candidate {
    legacy: bool,
    tier: u8,
    timestamp_hash: String,
    symbol: char,
    entropy_hash: String,
    level: u8,
    registry: Option<String>,
    geo_code: Option<String>,
    commercial: bool,
    checksum: Option<String>,
}

fuzz_target!(|c: Candidate| {
    let prefix = if c.legacy { "Λ" } else { "LUKHAS" };
    let id = format!(
        "{prefix}{}-{}-{}-{}",
        c.tier % 8,
        c.timestamp_hash,
        c.symbol,
        c.entropy_hash
    );

    let level = match c.level % 4 {
        0 => ValidationLevel::Basic,
        1 => ValidationLevel::Standard,
        2 => ValidationLevel::Full,
        _ => ValidationLevel::Enterprise,
    };

    let mut ctx = GenerationContext::new();
    if let Some(registry) = c.registry {
        ctx.insert("registry", registry);
    }
    if let Some(code) = c.geo_code {
        ctx.insert("geo_code", code);
    }
    ctx.insert("commercial", c.commercial);
    if let Some(sum) = c.checksum {
        ctx.insert("checksum", sum);
    }

    let validator = LambdaIdValidator::new(Arc::new(InMemoryRegistry::new()));
    let result = validator.validate(&id, level, Some(&ctx));

    if !result.format_valid {
        assert!(!result.valid);
        assert!(!result.tier_compliant);
        assert!(result.entropy.is_none());
    }
    if validator.is_reserved(&id) {
        assert!(!result.valid);
    }
});
