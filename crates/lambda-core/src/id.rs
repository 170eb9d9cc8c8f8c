//! Lambda ID value type
//!
//! Wire format:
//!
//! ```text
//! LambdaId ::= PREFIX TIER "-" TIMESTAMP_HASH "-" SYMBOL "-" ENTROPY_HASH
//! PREFIX   ::= "LUKHAS" | "Λ"
//! TIER     ::= [0-5]
//! HASH     ::= [A-F0-9]{4}
//! SYMBOL   ::= any single character
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{LambdaError, LambdaResult, TierLevel};

/// Grammar every Lambda ID matches
pub const ID_PATTERN: &str = r"^(LUKHAS|Λ)([0-5])-([A-F0-9]{4})-(.)-([A-F0-9]{4})$";

/// Length of each hash component in characters
pub const HASH_COMPONENT_LEN: usize = 4;

fn grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| Regex::new(ID_PATTERN).expect("ID grammar is a valid regex"))
}

/// Does `s` match the Lambda ID grammar?
pub fn matches_grammar(s: &str) -> bool {
    grammar().is_match(s)
}

/// Is `s` exactly four upper-case hex characters?
pub fn is_hash_component(s: &str) -> bool {
    s.len() == HASH_COMPONENT_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}

/// Leading brand of an ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IdPrefix {
    /// Current prefix, used for every newly generated ID
    #[default]
    Lukhas,
    /// Legacy `Λ` prefix, still accepted by validation
    Legacy,
}

impl IdPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            IdPrefix::Lukhas => "LUKHAS",
            IdPrefix::Legacy => "Λ",
        }
    }

    pub fn from_str_exact(s: &str) -> Option<Self> {
        match s {
            "LUKHAS" => Some(IdPrefix::Lukhas),
            "Λ" => Some(IdPrefix::Legacy),
            _ => None,
        }
    }
}

/// Immutable, grammar-checked Lambda ID
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LambdaId {
    raw: String,
    prefix: IdPrefix,
    tier: TierLevel,
    symbol: char,
}

impl LambdaId {
    /// Assemble an ID from its components
    pub fn new(
        prefix: IdPrefix,
        tier: TierLevel,
        timestamp_hash: &str,
        symbol: char,
        entropy_hash: &str,
    ) -> LambdaResult<Self> {
        for component in [timestamp_hash, entropy_hash] {
            if !is_hash_component(component) {
                return Err(LambdaError::InvalidHashComponent(component.to_string()));
            }
        }
        if symbol == '\n' {
            return Err(LambdaError::InvalidSymbol(symbol.to_string()));
        }

        let raw = format!(
            "{}{}-{}-{}-{}",
            prefix.as_str(),
            tier.digit(),
            timestamp_hash,
            symbol,
            entropy_hash
        );

        Ok(LambdaId {
            raw,
            prefix,
            tier,
            symbol,
        })
    }

    /// Parse and grammar-check an ID string
    pub fn parse(s: &str) -> LambdaResult<Self> {
        let caps = grammar()
            .captures(s)
            .ok_or_else(|| LambdaError::InvalidFormat(s.to_string()))?;

        // Capture groups are guaranteed by the grammar
        let prefix = IdPrefix::from_str_exact(&caps[1])
            .ok_or_else(|| LambdaError::InvalidFormat(s.to_string()))?;
        let tier_digit = caps[2].as_bytes()[0] - b'0';
        let tier = TierLevel::from_digit(tier_digit).ok_or(LambdaError::TierOutOfRange(tier_digit))?;
        let symbol = caps[4]
            .chars()
            .next()
            .ok_or_else(|| LambdaError::InvalidSymbol(String::new()))?;

        Ok(LambdaId {
            raw: s.to_string(),
            prefix,
            tier,
            symbol,
        })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn prefix(&self) -> IdPrefix {
        self.prefix
    }

    #[inline]
    pub fn tier(&self) -> TierLevel {
        self.tier
    }

    #[inline]
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Four hex characters derived from the issuance timestamp
    pub fn timestamp_hash(&self) -> &str {
        let start = self.prefix.as_str().len() + 2;
        &self.raw[start..start + HASH_COMPONENT_LEN]
    }

    /// Four hex characters derived from secure random material
    pub fn entropy_hash(&self) -> &str {
        &self.raw[self.raw.len() - HASH_COMPONENT_LEN..]
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Debug for LambdaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LambdaId({})", self.raw)
    }
}

impl fmt::Display for LambdaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for LambdaId {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl FromStr for LambdaId {
    type Err = LambdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LambdaId::parse(s)
    }
}

impl TryFrom<String> for LambdaId {
    type Error = LambdaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LambdaId::parse(&value)
    }
}

impl From<LambdaId> for String {
    fn from(id: LambdaId) -> Self {
        id.raw
    }
}

/// Loose dash-separated view of a candidate string.
///
/// Used to explain why a string failed the grammar. Nothing here is
/// validated beyond the split itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawParts<'a> {
    pub prefix: &'a str,
    pub tier: &'a str,
    pub timestamp_hash: &'a str,
    pub symbol: &'a str,
    pub entropy_hash: &'a str,
}

impl<'a> RawParts<'a> {
    /// Split a candidate on its dashes. Returns `None` unless there are
    /// exactly four fields and the first one carries a prefix and tier.
    pub fn split(s: &'a str) -> Option<Self> {
        let mut fields = s.splitn(4, '-');
        let head = fields.next()?;
        let timestamp_hash = fields.next()?;
        let rest = fields.next()?;
        let entropy_hash = fields.next()?;

        // Symbol may itself be a dash, so the tail is split from the right
        let (symbol, entropy_hash) = if entropy_hash.contains('-') {
            let joined = &s[s.len() - entropy_hash.len() - rest.len() - 1..];
            let idx = joined.rfind('-')?;
            (&joined[..idx], &joined[idx + 1..])
        } else {
            (rest, entropy_hash)
        };

        let split_at = head.char_indices().last()?.0;
        let (prefix, tier) = head.split_at(split_at);
        if prefix.is_empty() {
            return None;
        }

        Some(RawParts {
            prefix,
            tier,
            timestamp_hash,
            symbol,
            entropy_hash,
        })
    }
}
