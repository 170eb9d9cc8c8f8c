//! Lambda ID Crypto - Component derivation for new IDs
//!
//! Provides the pieces an ID is assembled from:
//! - Timestamp hash (SHA-256 of the millisecond clock)
//! - Tier symbol (caller preference or OS-backed random choice)
//! - Entropy hash (SHA-256 of OS random bytes, context and a tier salt)
//! - ID checksum used by enterprise validation

pub mod checksum;
pub mod components;
pub mod entropy;
pub mod symbol;
pub mod timestamp;

pub use checksum::*;
pub use components::*;
pub use entropy::*;
pub use symbol::*;
pub use timestamp::*;

use sha2::{Digest, Sha256};

/// First four upper-case hex characters of SHA-256 over `data`
pub(crate) fn digest_prefix(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    hex::encode_upper(&hash[..2])
}
