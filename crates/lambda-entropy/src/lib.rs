//! Lambda ID Entropy Analysis
//!
//! Scores an ID string on four axes and folds them into one total:
//! - Normalized Shannon entropy of the character distribution
//! - Character diversity (distinct / total)
//! - Weak-pattern penalties (sequences, repeats, weak words, palindromes)
//! - Randomness tests (distribution uniformity and runs)
//!
//! Analysis is a pure function of the input string: no RNG, no clock, no
//! shared state. Two calls on the same input return bit-identical results.

pub mod analysis;
pub mod patterns;
pub mod randomness;

pub use analysis::*;
pub use patterns::*;
pub use randomness::*;
