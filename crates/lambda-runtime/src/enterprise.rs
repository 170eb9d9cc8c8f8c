//! Enterprise-level validation rules and the typed validation context
//!
//! Enterprise validation layers context-driven policy on top of the full
//! check:
//! - Commercial IDs need a minimum tier and the current prefix
//! - A supplied geo code must be well-formed and not blocked
//! - The symbol must be a single visible, normalized, non-combining character
//! - A supplied (or required) checksum must match the ID

use lambda_core::{GenerationContext, IdPrefix, LambdaId};
use lambda_crypto::verify_checksum;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::is_nfc;

/// Context key selecting the registry expectation
pub const KEY_REGISTRY: &str = "registry";
/// Context key carrying an ISO 3166-1 alpha-2 code
pub const KEY_GEO_CODE: &str = "geo_code";
/// Context key marking a commercial ID
pub const KEY_COMMERCIAL: &str = "commercial";
/// Context key carrying the issued checksum
pub const KEY_CHECKSUM: &str = "checksum";

/// Enterprise policy knobs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnterprisePolicy {
    /// Lowest tier allowed to carry a commercial ID
    pub commercial_min_tier: u8,
    /// Accept the legacy `Λ` prefix on commercial IDs
    pub allow_legacy_prefix_commercial: bool,
    /// Geo codes that fail enterprise validation
    pub blocked_geo_codes: Vec<String>,
    /// Fail enterprise validation when no checksum is supplied
    pub require_checksum: bool,
}

impl Default for EnterprisePolicy {
    fn default() -> Self {
        EnterprisePolicy {
            commercial_min_tier: 2,
            allow_legacy_prefix_commercial: false,
            blocked_geo_codes: Vec::new(),
            require_checksum: false,
        }
    }
}

/// What the caller expects of the registry when validating
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryExpectation {
    /// Only the reserved set is consulted
    #[default]
    Ignore,
    /// The ID must have been issued by this registry (session checks)
    Issued,
    /// The ID must not be issued yet (imports, pre-registration)
    Unissued,
}

impl RegistryExpectation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ignore" => Some(RegistryExpectation::Ignore),
            "issued" => Some(RegistryExpectation::Issued),
            "unissued" | "fresh" => Some(RegistryExpectation::Unissued),
            _ => None,
        }
    }
}

/// Typed view of the validation context map
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationContext {
    pub registry: RegistryExpectation,
    pub geo_code: Option<String>,
    pub commercial: bool,
    pub checksum: Option<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, expectation: RegistryExpectation) -> Self {
        self.registry = expectation;
        self
    }

    pub fn with_geo_code(mut self, code: impl Into<String>) -> Self {
        self.geo_code = Some(code.into());
        self
    }

    pub fn with_commercial(mut self, commercial: bool) -> Self {
        self.commercial = commercial;
        self
    }

    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    /// Read the well-known keys. Unknown keys are ignored; an unknown
    /// registry expectation is treated as `ignore`.
    pub fn from_map(map: &GenerationContext) -> Self {
        ValidationContext {
            registry: map
                .get_str(KEY_REGISTRY)
                .and_then(RegistryExpectation::from_name)
                .unwrap_or_default(),
            geo_code: map.get_str(KEY_GEO_CODE).map(str::to_string),
            commercial: map.get_bool(KEY_COMMERCIAL).unwrap_or(false),
            checksum: map.get_str(KEY_CHECKSUM).map(str::to_string),
        }
    }
}

/// Two upper-case ASCII letters
pub fn is_geo_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Characters that render as nothing or alter neighbouring glyphs
fn is_invisible_modifier(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{2060}'..='\u{2064}' | '\u{FE00}'..='\u{FE0F}' | '\u{FEFF}'
    )
}

/// Reasons the symbol is unsafe to embed, empty when it is safe
pub fn symbol_safety_violations(symbol: char) -> Vec<String> {
    let mut out = Vec::new();

    if symbol.is_control() || symbol.is_whitespace() {
        out.push(format!("symbol U+{:04X} is a control or whitespace character", symbol as u32));
    }
    if canonical_combining_class(symbol) != 0 {
        out.push(format!("symbol U+{:04X} is a combining character", symbol as u32));
    }
    if is_invisible_modifier(symbol) {
        out.push(format!("symbol U+{:04X} is an invisible modifier", symbol as u32));
    }
    if symbol.is_ascii_alphanumeric() || symbol == '-' {
        out.push(format!("symbol {symbol:?} is ambiguous with ID delimiters or hash digits"));
    }
    if !is_nfc(symbol.encode_utf8(&mut [0u8; 4])) {
        out.push(format!("symbol U+{:04X} is not in NFC form", symbol as u32));
    }

    out
}

/// Every enterprise rule `id` breaks under `policy` and `ctx`
pub fn enterprise_violations(
    id: &LambdaId,
    ctx: &ValidationContext,
    policy: &EnterprisePolicy,
) -> Vec<String> {
    let mut out = Vec::new();

    if ctx.commercial {
        if id.tier().digit() < policy.commercial_min_tier {
            out.push(format!(
                "commercial IDs require tier {} or above, got {}",
                policy.commercial_min_tier,
                id.tier()
            ));
        }
        if id.prefix() == IdPrefix::Legacy && !policy.allow_legacy_prefix_commercial {
            out.push("commercial IDs must use the LUKHAS prefix".to_string());
        }
    }

    if let Some(code) = &ctx.geo_code {
        if !is_geo_code(code) {
            out.push(format!("geo code {code:?} is not ISO 3166-1 alpha-2"));
        } else if policy.blocked_geo_codes.iter().any(|b| b == code) {
            out.push(format!("geo code {code} is not permitted"));
        }
    }

    out.extend(symbol_safety_violations(id.symbol()));

    match &ctx.checksum {
        Some(sum) if !verify_checksum(id.as_str(), sum) => {
            out.push("checksum does not match".to_string());
        }
        None if policy.require_checksum => out.push("checksum required".to_string()),
        _ => {}
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_crypto::checksum;

    fn id(s: &str) -> LambdaId {
        LambdaId::parse(s).unwrap()
    }

    #[test]
    fn test_clean_id_passes() {
        let v = enterprise_violations(
            &id("LUKHAS2-A1B2-🌀-C3D4"),
            &ValidationContext::new(),
            &EnterprisePolicy::default(),
        );
        assert!(v.is_empty(), "{v:?}");
    }

    #[test]
    fn test_commercial_rules() {
        let ctx = ValidationContext::new().with_commercial(true);
        let policy = EnterprisePolicy::default();

        assert!(enterprise_violations(&id("LUKHAS2-A1B2-🌀-C3D4"), &ctx, &policy).is_empty());

        let low = enterprise_violations(&id("LUKHAS1-A1B2-△-C3D4"), &ctx, &policy);
        assert_eq!(low.len(), 1);
        assert!(low[0].contains("tier 2"));

        let legacy = enterprise_violations(&id("Λ3-A1B2-✨-C3D4"), &ctx, &policy);
        assert_eq!(legacy, vec!["commercial IDs must use the LUKHAS prefix".to_string()]);

        let lenient = EnterprisePolicy {
            allow_legacy_prefix_commercial: true,
            ..EnterprisePolicy::default()
        };
        assert!(enterprise_violations(&id("Λ3-A1B2-✨-C3D4"), &ctx, &lenient).is_empty());
    }

    #[test]
    fn test_geo_codes() {
        let policy = EnterprisePolicy {
            blocked_geo_codes: vec!["KP".to_string()],
            ..EnterprisePolicy::default()
        };
        let target = id("LUKHAS3-A1B2-✨-C3D4");

        let ok = ValidationContext::new().with_geo_code("DE");
        assert!(enterprise_violations(&target, &ok, &policy).is_empty());

        let blocked = ValidationContext::new().with_geo_code("KP");
        assert_eq!(enterprise_violations(&target, &blocked, &policy).len(), 1);

        let malformed = ValidationContext::new().with_geo_code("Germany");
        assert_eq!(enterprise_violations(&target, &malformed, &policy).len(), 1);
    }

    #[test]
    fn test_symbol_safety() {
        assert!(symbol_safety_violations('🌀').is_empty());
        assert!(symbol_safety_violations('⟐').is_empty());
        assert!(!symbol_safety_violations('\u{0301}').is_empty());
        assert!(!symbol_safety_violations('\u{200D}').is_empty());
        assert!(!symbol_safety_violations('\u{FE0F}').is_empty());
        assert!(!symbol_safety_violations(' ').is_empty());
        assert!(!symbol_safety_violations('-').is_empty());
        assert!(!symbol_safety_violations('A').is_empty());
    }

    #[test]
    fn test_combining_symbol_in_id() {
        let combining = id("LUKHAS2-A1B2-\u{0301}-C3D4");
        let v = enterprise_violations(&combining, &ValidationContext::new(), &EnterprisePolicy::default());
        assert!(v.iter().any(|m| m.contains("combining")));
    }

    #[test]
    fn test_checksum_rules() {
        let target = id("LUKHAS4-0A1B-💫-2C3D");
        let policy = EnterprisePolicy::default();

        let good = ValidationContext::new().with_checksum(checksum(target.as_str()));
        assert!(enterprise_violations(&target, &good, &policy).is_empty());

        let bad = ValidationContext::new().with_checksum("0000");
        // a wrong checksum can only collide with probability 1/65536; this one does not
        assert_ne!(checksum(target.as_str()), "0000");
        assert_eq!(
            enterprise_violations(&target, &bad, &policy),
            vec!["checksum does not match".to_string()]
        );

        let strict = EnterprisePolicy {
            require_checksum: true,
            ..EnterprisePolicy::default()
        };
        assert_eq!(
            enterprise_violations(&target, &ValidationContext::new(), &strict),
            vec!["checksum required".to_string()]
        );
    }

    #[test]
    fn test_context_from_map() {
        let map = GenerationContext::new()
            .with("registry", "issued")
            .with("geo_code", "FR")
            .with("commercial", true)
            .with("checksum", "ABCD")
            .with("email", "a@b.com");
        let ctx = ValidationContext::from_map(&map);
        assert_eq!(ctx.registry, RegistryExpectation::Issued);
        assert_eq!(ctx.geo_code.as_deref(), Some("FR"));
        assert!(ctx.commercial);
        assert_eq!(ctx.checksum.as_deref(), Some("ABCD"));

        let odd = GenerationContext::new().with("registry", "sometimes");
        assert_eq!(ValidationContext::from_map(&odd).registry, RegistryExpectation::Ignore);
    }
}
