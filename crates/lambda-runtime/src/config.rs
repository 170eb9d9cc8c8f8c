//! Engine configuration

use std::path::Path;

use lambda_core::matches_grammar;
use serde::{Deserialize, Serialize};

use crate::{is_geo_code, ConfigError, EnterprisePolicy, TracingConfig};

/// Default number of retries after a rejected candidate
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Upper bound on `max_retries` accepted from configuration
pub const MAX_RETRY_LIMIT: u32 = 100;

/// Lambda ID engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Retries after a reserved, weak or colliding candidate
    pub max_retries: u32,
    /// Reject candidates scoring below their tier's entropy minimum.
    /// Cryptographic-rigor tiers do this regardless.
    pub enforce_entropy_floor: bool,
    /// Reserved IDs on top of the built-in set
    pub extra_reserved_ids: Vec<String>,
    pub enterprise: EnterprisePolicy,
    pub tracing: TracingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_retries: DEFAULT_MAX_RETRIES,
            enforce_entropy_floor: false,
            extra_reserved_ids: Vec::new(),
            enterprise: EnterprisePolicy::default(),
            tracing: TracingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries > MAX_RETRY_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_retries {} exceeds limit {}",
                self.max_retries, MAX_RETRY_LIMIT
            )));
        }

        if let Some(bad) = self.extra_reserved_ids.iter().find(|id| !matches_grammar(id)) {
            return Err(ConfigError::Invalid(format!(
                "reserved ID {bad:?} is not a well-formed Lambda ID"
            )));
        }

        if let Some(bad) = self
            .enterprise
            .blocked_geo_codes
            .iter()
            .find(|code| !is_geo_code(code))
        {
            return Err(ConfigError::Invalid(format!(
                "blocked geo code {bad:?} is not an ISO 3166-1 alpha-2 code"
            )));
        }

        if self.enterprise.commercial_min_tier > 5 {
            return Err(ConfigError::Invalid(format!(
                "commercial_min_tier {} is not a tier",
                self.enterprise.commercial_min_tier
            )));
        }

        Ok(())
    }
}
