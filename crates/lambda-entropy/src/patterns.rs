//! Weak-pattern detection

use std::fmt;

use lambda_core::RawParts;
use serde::{Deserialize, Serialize};

/// Score deducted for each detected weak pattern
pub const PATTERN_PENALTY: f64 = 0.2;

/// Minimum length of a sequential or repeated run that counts as weak
pub const MIN_RUN_LEN: usize = 3;

/// Substrings that must not appear inside hash components (case-insensitive)
pub const WEAK_SUBSTRINGS: &[&str] = &[
    "test", "null", "admin", "root", "pass", "dead", "beef", "cafe", "babe", "face", "c0de",
];

/// A single detected weakness
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeakPattern {
    /// Ascending or descending run such as `ABC` or `321`
    Sequential { run: String },
    /// Same character three or more times in a row
    Repeated { ch: char, len: usize },
    /// Known weak word inside a hash component
    WeakSubstring { word: String, component: String },
    /// Hash component that reads the same backwards
    Palindrome { component: String },
}

impl fmt::Display for WeakPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeakPattern::Sequential { run } => write!(f, "sequential run {run:?}"),
            WeakPattern::Repeated { ch, len } => write!(f, "{ch:?} repeated {len} times"),
            WeakPattern::WeakSubstring { word, component } => {
                write!(f, "weak substring {word:?} in {component:?}")
            }
            WeakPattern::Palindrome { component } => write!(f, "palindromic component {component:?}"),
        }
    }
}

/// Hash components of an ID, or the whole string when it does not split
pub fn hash_components(s: &str) -> Vec<&str> {
    match RawParts::split(s) {
        Some(parts) => vec![parts.timestamp_hash, parts.entropy_hash],
        None if s.is_empty() => Vec::new(),
        None => vec![s],
    }
}

/// Detect every weak pattern in `s`, in a stable order
pub fn detect_weak_patterns(s: &str) -> Vec<WeakPattern> {
    let chars: Vec<char> = s.chars().collect();
    let mut found = Vec::new();

    found.extend(sequential_runs(&chars));
    found.extend(repeated_runs(&chars));

    for component in hash_components(s) {
        let lower = component.to_ascii_lowercase();
        for word in WEAK_SUBSTRINGS {
            if lower.contains(word) {
                found.push(WeakPattern::WeakSubstring {
                    word: (*word).to_string(),
                    component: component.to_string(),
                });
            }
        }
        if is_palindrome(component) {
            found.push(WeakPattern::Palindrome {
                component: component.to_string(),
            });
        }
    }

    found
}

/// `1.0` minus the penalty for every pattern, floored at `0.0`
pub fn pattern_score(patterns: &[WeakPattern]) -> f64 {
    (1.0 - PATTERN_PENALTY * patterns.len() as f64).max(0.0)
}

fn is_palindrome(component: &str) -> bool {
    let chars: Vec<char> = component.chars().collect();
    chars.len() >= MIN_RUN_LEN && chars.iter().eq(chars.iter().rev())
}

/// Two characters are sequence neighbours when both are ASCII digits or
/// both ASCII letters of the same case and their codes differ by `step`.
fn steps_by(a: char, b: char, step: i32) -> bool {
    let same_class = (a.is_ascii_digit() && b.is_ascii_digit())
        || (a.is_ascii_uppercase() && b.is_ascii_uppercase())
        || (a.is_ascii_lowercase() && b.is_ascii_lowercase());
    same_class && (b as i32 - a as i32) == step
}

fn sequential_runs(chars: &[char]) -> Vec<WeakPattern> {
    let mut runs = Vec::new();

    for step in [1, -1] {
        let mut start = 0;
        while start < chars.len() {
            let mut end = start + 1;
            while end < chars.len() && steps_by(chars[end - 1], chars[end], step) {
                end += 1;
            }
            if end - start >= MIN_RUN_LEN {
                runs.push(WeakPattern::Sequential {
                    run: chars[start..end].iter().collect(),
                });
            }
            start = end;
        }
    }

    runs
}

fn repeated_runs(chars: &[char]) -> Vec<WeakPattern> {
    let mut runs = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = start + 1;
        while end < chars.len() && chars[end] == chars[start] {
            end += 1;
        }
        if end - start >= MIN_RUN_LEN {
            runs.push(WeakPattern::Repeated {
                ch: chars[start],
                len: end - start,
            });
        }
        start = end;
    }

    runs
}
