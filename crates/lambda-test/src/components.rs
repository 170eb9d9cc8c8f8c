//! Deterministic component sources
//!
//! `ScriptedComponents` replays exact candidates so tests can force
//! collisions, reserved hits and malformed output. `SeededComponents`
//! produces well-formed but reproducible candidates from a fixed seed.

use lambda_core::{GenerationContext, RawParts, TierLevel};
use lambda_crypto::ComponentSource;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The three variable fields of one candidate ID
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub timestamp_hash: String,
    pub symbol: char,
    pub entropy_hash: String,
}

impl Candidate {
    pub fn new(timestamp_hash: &str, symbol: char, entropy_hash: &str) -> Self {
        Candidate {
            timestamp_hash: timestamp_hash.to_string(),
            symbol,
            entropy_hash: entropy_hash.to_string(),
        }
    }

    /// Fields of an existing ID string. Returns `None` if it does not split
    /// or its symbol is not a single character.
    pub fn from_id(id: &str) -> Option<Self> {
        let parts = RawParts::split(id)?;
        let mut symbols = parts.symbol.chars();
        let symbol = symbols.next()?;
        if symbols.next().is_some() {
            return None;
        }
        Some(Candidate::new(parts.timestamp_hash, symbol, parts.entropy_hash))
    }
}

/// Replays candidates in order. Once the script is exhausted the last
/// candidate repeats forever.
///
/// The generator asks for the timestamp hash, symbol and entropy hash in
/// that order, so the script advances after each entropy hash.
#[derive(Debug)]
pub struct ScriptedComponents {
    script: Mutex<ScriptState>,
}

#[derive(Debug)]
struct ScriptState {
    candidates: Vec<Candidate>,
    cursor: usize,
    contexts: Vec<Option<GenerationContext>>,
}

impl ScriptedComponents {
    /// # Panics
    ///
    /// Panics when `candidates` is empty.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        assert!(!candidates.is_empty(), "script needs at least one candidate");
        ScriptedComponents {
            script: Mutex::new(ScriptState {
                candidates,
                cursor: 0,
                contexts: Vec::new(),
            }),
        }
    }

    /// Script built from full ID strings; strings that do not split are
    /// skipped.
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(ids.into_iter().filter_map(Candidate::from_id).collect())
    }

    /// Contexts the generator passed to each entropy hash request
    pub fn seen_contexts(&self) -> Vec<Option<GenerationContext>> {
        self.script.lock().contexts.clone()
    }

    /// Number of candidates handed out so far
    pub fn requests(&self) -> usize {
        self.script.lock().contexts.len()
    }

    fn current(&self) -> Candidate {
        let script = self.script.lock();
        script.candidates[script.cursor].clone()
    }
}

impl ComponentSource for ScriptedComponents {
    fn timestamp_hash(&self) -> String {
        self.current().timestamp_hash
    }

    fn symbol(&self, _tier: TierLevel, _preference: Option<char>) -> char {
        self.current().symbol
    }

    fn entropy_hash(&self, _tier: TierLevel, context: Option<&GenerationContext>) -> String {
        let mut script = self.script.lock();
        script.contexts.push(context.cloned());
        let hash = script.candidates[script.cursor].entropy_hash.clone();
        if script.cursor + 1 < script.candidates.len() {
            script.cursor += 1;
        }
        hash
    }
}

/// Well-formed candidates from a seeded `StdRng`
#[derive(Debug)]
pub struct SeededComponents {
    rng: Mutex<StdRng>,
}

impl SeededComponents {
    pub fn new(seed: u64) -> Self {
        SeededComponents {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn hex4(&self) -> String {
        format!("{:04X}", self.rng.lock().gen::<u16>())
    }
}

impl ComponentSource for SeededComponents {
    fn timestamp_hash(&self) -> String {
        self.hex4()
    }

    fn symbol(&self, tier: TierLevel, preference: Option<char>) -> char {
        let allowed = tier.spec().allowed_symbols;
        match preference {
            Some(symbol) if allowed.contains(&symbol) => symbol,
            _ => *allowed
                .choose(&mut *self.rng.lock())
                .unwrap_or(&allowed[0]),
        }
    }

    fn entropy_hash(&self, _tier: TierLevel, _context: Option<&GenerationContext>) -> String {
        self.hex4()
    }
}
