//! Entropy analysis and security-level classification

use std::fmt;

use lambda_core::TierLevel;
use serde::{Deserialize, Serialize};

use crate::patterns::{detect_weak_patterns, pattern_score, WeakPattern};
use crate::randomness::{frequencies, randomness_score, shannon_entropy};

/// Weight of normalized entropy in the total score
pub const WEIGHT_ENTROPY: f64 = 0.3;
/// Weight of character diversity in the total score
pub const WEIGHT_DIVERSITY: f64 = 0.2;
/// Weight of the pattern score in the total score
pub const WEIGHT_PATTERN: f64 = 0.3;
/// Weight of the randomness score in the total score
pub const WEIGHT_RANDOMNESS: f64 = 0.2;

/// Qualitative bucket for a total score. Buckets are half-open:
/// `[0,0.3) [0.3,0.5) [0.5,0.7) [0.7,0.9) [0.9,1.0) {1.0}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SecurityLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
    Cryptographic,
}

impl SecurityLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 1.0 {
            SecurityLevel::Cryptographic
        } else if score >= 0.9 {
            SecurityLevel::VeryHigh
        } else if score >= 0.7 {
            SecurityLevel::High
        } else if score >= 0.5 {
            SecurityLevel::Medium
        } else if score >= 0.3 {
            SecurityLevel::Low
        } else {
            SecurityLevel::VeryLow
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SecurityLevel::VeryLow => "VERY_LOW",
            SecurityLevel::Low => "LOW",
            SecurityLevel::Medium => "MEDIUM",
            SecurityLevel::High => "HIGH",
            SecurityLevel::VeryHigh => "VERY_HIGH",
            SecurityLevel::Cryptographic => "CRYPTOGRAPHIC",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of analyzing one string. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntropyAnalysis {
    /// Bits per character
    pub shannon_entropy: f64,
    /// Entropy relative to its maximum for the observed alphabet
    pub normalized_entropy: f64,
    /// Distinct characters over total characters
    pub character_diversity: f64,
    /// `1.0` minus weak-pattern penalties
    pub pattern_score: f64,
    /// Uniformity and runs tests combined
    pub randomness_score: f64,
    /// Weighted combination of the four sub-scores
    pub total_score: f64,
    pub security_level: SecurityLevel,
    /// Every weak pattern that contributed to `pattern_score`
    pub weak_patterns: Vec<WeakPattern>,
}

impl EntropyAnalysis {
    /// Does the total score reach the tier's minimum?
    pub fn meets_tier(&self, tier: TierLevel) -> bool {
        self.total_score >= tier.spec().min_entropy_score
    }

    /// Human-readable suggestions for each weak sub-score
    pub fn recommendations(&self) -> Vec<String> {
        let mut out = Vec::new();

        if self.normalized_entropy < 0.7 {
            out.push("Increase character variety to raise entropy".to_string());
        }
        if self.character_diversity < 0.5 {
            out.push("Reduce repeated characters to improve diversity".to_string());
        }
        for pattern in &self.weak_patterns {
            out.push(format!("Avoid {pattern}"));
        }
        if self.randomness_score < 0.6 {
            out.push("Use a cryptographically secure source for hash components".to_string());
        }
        if self.security_level < SecurityLevel::Medium {
            out.push("Regenerate the ID; its overall security level is too low".to_string());
        }

        out
    }
}

/// Stateless analyzer
#[derive(Clone, Copy, Debug, Default)]
pub struct EntropyAnalyzer;

impl EntropyAnalyzer {
    pub fn new() -> Self {
        EntropyAnalyzer
    }

    /// Analyze `id`. Any string is accepted. The empty string has no
    /// patterns, so only its pattern score is non-zero.
    pub fn analyze(&self, id: &str) -> EntropyAnalysis {
        analyze_entropy(id)
    }
}

/// Analyze an ID string
pub fn analyze_entropy(id: &str) -> EntropyAnalysis {
    let chars: Vec<char> = id.chars().collect();
    let total = chars.len();
    let freq = frequencies(&chars);
    let distinct = freq.len();

    let shannon = shannon_entropy(&freq, total);
    let normalized_entropy = if distinct <= 1 {
        0.0
    } else {
        (shannon / (distinct as f64).log2()).clamp(0.0, 1.0)
    };
    let character_diversity = if total == 0 {
        0.0
    } else {
        distinct as f64 / total as f64
    };

    let weak_patterns = detect_weak_patterns(id);
    let pattern = pattern_score(&weak_patterns);
    let randomness = randomness_score(&chars, &freq);

    let total_score = (WEIGHT_ENTROPY * normalized_entropy
        + WEIGHT_DIVERSITY * character_diversity
        + WEIGHT_PATTERN * pattern
        + WEIGHT_RANDOMNESS * randomness)
        .clamp(0.0, 1.0);

    EntropyAnalysis {
        shannon_entropy: shannon,
        normalized_entropy,
        character_diversity,
        pattern_score: pattern,
        randomness_score: randomness,
        total_score,
        security_level: SecurityLevel::from_score(total_score),
        weak_patterns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_string() {
        let a = analyze_entropy("");
        assert_eq!(a.shannon_entropy, 0.0);
        assert_eq!(a.normalized_entropy, 0.0);
        assert_eq!(a.character_diversity, 0.0);
        assert_eq!(a.randomness_score, 0.0);
        // no patterns, so only the pattern weight contributes
        assert_eq!(a.pattern_score, 1.0);
        assert!((a.total_score - WEIGHT_PATTERN).abs() < 1e-12);
        assert_eq!(a.security_level, SecurityLevel::Low);
    }

    #[test]
    fn test_cryptographic_needs_full_score() {
        assert_eq!(SecurityLevel::from_score(1.0), SecurityLevel::Cryptographic);
        assert_eq!(SecurityLevel::from_score(0.9999999995), SecurityLevel::VeryHigh);
        assert_eq!(SecurityLevel::from_score(0.9), SecurityLevel::VeryHigh);
        assert_eq!(
            WEIGHT_ENTROPY + WEIGHT_DIVERSITY + WEIGHT_PATTERN + WEIGHT_RANDOMNESS,
            1.0
        );
    }

    #[test]
    fn test_typical_id_scores_high() {
        let a = analyze_entropy("LUKHAS2-A1B2-🌀-C3D4");
        assert!(a.weak_patterns.is_empty());
        assert_eq!(a.pattern_score, 1.0);
        assert!(a.total_score >= 0.9, "total {}", a.total_score);
        assert_eq!(a.security_level, SecurityLevel::VeryHigh);
        assert!(a.meets_tier(TierLevel::RootDev));
    }

    #[test]
    fn test_reserved_style_id_scores_low() {
        let a = analyze_entropy("Λ0-0000-○-0000");
        // two repeated runs, two palindromic components
        assert_eq!(a.weak_patterns.len(), 4);
        assert!((a.pattern_score - 0.2).abs() < 1e-9);
        assert!(a.total_score < analyze_entropy("Λ0-7C1E-○-A94F").total_score);
    }

    #[test]
    fn test_single_character_string() {
        let a = analyze_entropy("AAAAAAAA");
        assert_eq!(a.normalized_entropy, 0.0);
        assert_eq!(a.character_diversity, 0.125);
        assert_eq!(a.security_level, SecurityLevel::VeryLow);
    }

    #[test]
    fn test_all_distinct_pattern_free_is_cryptographic() {
        let a = analyze_entropy("Q7X2M9");
        assert!(a.weak_patterns.is_empty());
        assert_eq!(a.character_diversity, 1.0);
        assert_eq!(a.security_level, SecurityLevel::Cryptographic);
    }

    #[test]
    fn test_security_level_boundaries() {
        assert_eq!(SecurityLevel::from_score(0.0), SecurityLevel::VeryLow);
        assert_eq!(SecurityLevel::from_score(0.29), SecurityLevel::VeryLow);
        assert_eq!(SecurityLevel::from_score(0.3), SecurityLevel::Low);
        assert_eq!(SecurityLevel::from_score(0.5), SecurityLevel::Medium);
        assert_eq!(SecurityLevel::from_score(0.7), SecurityLevel::High);
        assert_eq!(SecurityLevel::from_score(0.89), SecurityLevel::High);
        assert_eq!(SecurityLevel::from_score(0.9), SecurityLevel::VeryHigh);
        assert_eq!(SecurityLevel::from_score(0.99), SecurityLevel::VeryHigh);
        assert_eq!(SecurityLevel::from_score(1.0), SecurityLevel::Cryptographic);
    }

    #[test]
    fn test_recommendations_name_patterns() {
        let a = analyze_entropy("LUKHAS0-DEAD-○-1111");
        let recs = a.recommendations();
        assert!(recs.iter().any(|r| r.contains("dead")));
        assert!(recs.iter().any(|r| r.contains("repeated")));
    }

    proptest! {
        #[test]
        fn prop_analysis_is_deterministic(s in ".{0,40}") {
            let a = analyze_entropy(&s);
            let b = analyze_entropy(&s);
            prop_assert_eq!(a.total_score.to_bits(), b.total_score.to_bits());
            prop_assert_eq!(a.shannon_entropy.to_bits(), b.shannon_entropy.to_bits());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_scores_are_bounded(s in ".{0,40}") {
            let a = analyze_entropy(&s);
            for score in [
                a.normalized_entropy,
                a.character_diversity,
                a.pattern_score,
                a.randomness_score,
                a.total_score,
            ] {
                prop_assert!((0.0..=1.0).contains(&score));
            }
            prop_assert!(a.shannon_entropy >= 0.0);
        }
    }
}
