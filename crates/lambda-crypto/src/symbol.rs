//! Tier symbol selection

use lambda_core::TierLevel;
use rand::rngs::OsRng;
use rand::Rng;

/// Picks the symbol field of a new ID
#[derive(Clone, Copy, Debug, Default)]
pub struct SymbolSelector;

impl SymbolSelector {
    pub fn new() -> Self {
        SymbolSelector
    }

    /// Return `preference` when the tier allows it, otherwise a uniform
    /// draw from the tier's symbol set using the OS RNG. The result is
    /// always a member of the tier's set.
    pub fn select(&self, tier: TierLevel, preference: Option<char>) -> char {
        let spec = tier.spec();

        if let Some(symbol) = preference.filter(|c| spec.allows(*c)) {
            return symbol;
        }

        let mut rng = OsRng;
        let idx = rng.gen_range(0..spec.allowed_symbols.len());
        spec.allowed_symbols[idx]
    }
}
