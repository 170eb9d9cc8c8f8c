//! ID checksums

use crate::digest_prefix;

/// Four upper-case hex characters of SHA-256 over the full ID string.
/// Issued alongside an ID so enterprise validation can detect tampering.
pub fn checksum(id: &str) -> String {
    digest_prefix(id.as_bytes())
}

/// Constant-shape comparison of a supplied checksum against the ID.
/// Case-insensitive on the supplied value.
pub fn verify_checksum(id: &str, supplied: &str) -> bool {
    let expected = checksum(id);
    supplied.len() == expected.len()
        && supplied
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a.to_ascii_uppercase() ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_shape() {
        let sum = checksum("LUKHAS2-A1B2-🌀-C3D4");
        assert_eq!(sum.len(), 4);
        assert!(lambda_core::is_hash_component(&sum));
    }

    #[test]
    fn test_verify_checksum() {
        let id = "LUKHAS3-0F1E-✨-99C2";
        let sum = checksum(id);
        assert!(verify_checksum(id, &sum));
        assert!(verify_checksum(id, &sum.to_ascii_lowercase()));
        assert!(!verify_checksum("LUKHAS3-0F1E-✨-99C3", &sum));
        assert!(!verify_checksum(id, "ABC"));
    }
}
