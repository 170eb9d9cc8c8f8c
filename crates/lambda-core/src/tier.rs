//! Tier table definitions
//!
//! Lambda IDs carry one of six access tiers. Each tier constrains:
//! - Which symbols may appear in the symbol field
//! - The minimum entropy score the whole ID must reach
//! - How rigorously the ID should be validated by default
//!
//! Symbol sets grow cumulatively: every tier allows everything the tier
//! below it allows, plus one more symbol.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every tier symbol, ordered by the tier that introduces it.
/// Tier `n` allows the first `3 + n` entries.
const TIER_SYMBOLS: [char; 8] = ['◊', '○', '□', '△', '🌀', '✨', '💫', '⟐'];

/// Number of symbols available at tier 0
const BASE_SYMBOL_COUNT: usize = 3;

/// Access tier embedded in every Lambda ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TierLevel {
    /// Anonymous or unverified callers
    #[default]
    Guest = 0,
    /// Registered but lightly verified
    Visitor = 1,
    /// Verified account
    Friend = 2,
    /// Established trust relationship
    Trusted = 3,
    /// Operator-granted elevated access
    InnerCircle = 4,
    /// Platform developers
    RootDev = 5,
}

impl TierLevel {
    /// Parse from the numeric tier
    pub fn from_digit(d: u8) -> Option<Self> {
        match d {
            0 => Some(TierLevel::Guest),
            1 => Some(TierLevel::Visitor),
            2 => Some(TierLevel::Friend),
            3 => Some(TierLevel::Trusted),
            4 => Some(TierLevel::InnerCircle),
            5 => Some(TierLevel::RootDev),
            _ => None,
        }
    }

    /// Parse from the tier character inside an ID string
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::from_digit(d as u8))
    }

    /// Numeric tier
    #[inline]
    pub fn digit(self) -> u8 {
        self as u8
    }

    /// Canonical upper-case tier name
    pub fn name(self) -> &'static str {
        match self {
            TierLevel::Guest => "GUEST",
            TierLevel::Visitor => "VISITOR",
            TierLevel::Friend => "FRIEND",
            TierLevel::Trusted => "TRUSTED",
            TierLevel::InnerCircle => "INNER_CIRCLE",
            TierLevel::RootDev => "ROOT_DEV",
        }
    }

    /// Next tier up, if any
    pub fn upgrade(self) -> Option<Self> {
        Self::from_digit(self.digit() + 1)
    }

    /// Get all tiers, lowest first
    pub fn all() -> &'static [TierLevel] {
        &[
            TierLevel::Guest,
            TierLevel::Visitor,
            TierLevel::Friend,
            TierLevel::Trusted,
            TierLevel::InnerCircle,
            TierLevel::RootDev,
        ]
    }

    /// Static table entry for this tier
    pub fn spec(self) -> TierSpec {
        let (min_entropy_score, validation_rigor) = match self {
            TierLevel::Guest => (0.3, ValidationRigor::Basic),
            TierLevel::Visitor => (0.4, ValidationRigor::Standard),
            TierLevel::Friend => (0.5, ValidationRigor::Enhanced),
            TierLevel::Trusted => (0.6, ValidationRigor::Enhanced),
            TierLevel::InnerCircle => (0.7, ValidationRigor::Full),
            TierLevel::RootDev => (0.8, ValidationRigor::Cryptographic),
        };

        TierSpec {
            tier: self,
            allowed_symbols: &TIER_SYMBOLS[..BASE_SYMBOL_COUNT + self.digit() as usize],
            min_entropy_score,
            validation_rigor,
        }
    }
}

impl fmt::Display for TierLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

/// How thoroughly IDs of a tier are checked by default
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValidationRigor {
    Basic,
    Standard,
    Enhanced,
    Full,
    Cryptographic,
}

impl ValidationRigor {
    /// Lowest validation level that satisfies this rigor
    pub fn minimum_level(self) -> ValidationLevel {
        match self {
            ValidationRigor::Basic => ValidationLevel::Basic,
            ValidationRigor::Standard => ValidationLevel::Standard,
            ValidationRigor::Enhanced | ValidationRigor::Full => ValidationLevel::Full,
            ValidationRigor::Cryptographic => ValidationLevel::Enterprise,
        }
    }
}

/// Per-tier immutable configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierSpec {
    pub tier: TierLevel,
    pub allowed_symbols: &'static [char],
    pub min_entropy_score: f64,
    pub validation_rigor: ValidationRigor,
}

impl TierSpec {
    /// Is `symbol` a member of this tier's symbol set?
    #[inline]
    pub fn allows(&self, symbol: char) -> bool {
        self.allowed_symbols.contains(&symbol)
    }
}

/// Cascading validation levels. Each level implies every level below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum ValidationLevel {
    /// Grammar match and reservation check
    Basic,
    /// Tier digit, symbol set and hash component shape
    #[default]
    Standard,
    /// Registry membership and entropy threshold
    Full,
    /// Commercial, geo, Unicode safety and checksum rules
    Enterprise,
}

impl ValidationLevel {
    /// Does this level include the checks of `other`?
    #[inline]
    pub fn includes(self, other: ValidationLevel) -> bool {
        self >= other
    }

    pub fn name(self) -> &'static str {
        match self {
            ValidationLevel::Basic => "basic",
            ValidationLevel::Standard => "standard",
            ValidationLevel::Full => "full",
            ValidationLevel::Enterprise => "enterprise",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_digit_roundtrip() {
        for tier in TierLevel::all() {
            assert_eq!(TierLevel::from_digit(tier.digit()), Some(*tier));
        }
        assert_eq!(TierLevel::from_digit(6), None);
        assert_eq!(TierLevel::from_char('9'), None);
        assert_eq!(TierLevel::from_char('x'), None);
    }

    #[test]
    fn test_entropy_thresholds_strictly_increase() {
        let thresholds: Vec<f64> = TierLevel::all()
            .iter()
            .map(|t| t.spec().min_entropy_score)
            .collect();
        assert_eq!(thresholds, vec![0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);
        assert!(thresholds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_symbol_sets_are_cumulative() {
        let all = TierLevel::all();
        assert_eq!(all[0].spec().allowed_symbols.len(), 3);
        assert_eq!(all[5].spec().allowed_symbols.len(), 8);

        for pair in all.windows(2) {
            let lower = pair[0].spec();
            let upper = pair[1].spec();
            assert!(lower.allowed_symbols.iter().all(|s| upper.allows(*s)));
            assert!(upper.allowed_symbols.len() > lower.allowed_symbols.len());
        }
    }

    #[test]
    fn test_friend_allows_spiral() {
        assert!(TierLevel::Friend.spec().allows('🌀'));
        assert!(!TierLevel::Visitor.spec().allows('🌀'));
        assert!(TierLevel::Guest.spec().allows('○'));
    }

    #[test]
    fn test_upgrade_stops_at_root() {
        assert_eq!(TierLevel::Guest.upgrade(), Some(TierLevel::Visitor));
        assert_eq!(TierLevel::RootDev.upgrade(), None);
    }

    #[test]
    fn test_level_ordering() {
        assert!(ValidationLevel::Enterprise.includes(ValidationLevel::Full));
        assert!(ValidationLevel::Full.includes(ValidationLevel::Basic));
        assert!(!ValidationLevel::Basic.includes(ValidationLevel::Standard));
        assert_eq!(
            ValidationRigor::Cryptographic.minimum_level(),
            ValidationLevel::Enterprise
        );
    }
}
