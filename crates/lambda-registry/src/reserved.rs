//! Reserved IDs
//!
//! Placeholder and system IDs that are well-formed but must never be
//! issued. Validation rejects them at every level.

/// Built-in reserved IDs, legacy and current prefix
pub const RESERVED_IDS: &[&str] = &[
    "Λ0-0000-○-0000",
    "LUKHAS0-0000-○-0000",
    "Λ0-FFFF-○-FFFF",
    "LUKHAS0-FFFF-○-FFFF",
    "Λ5-0000-⟐-0000",
    "LUKHAS5-0000-⟐-0000",
    "Λ5-FFFF-⟐-FFFF",
    "LUKHAS5-FFFF-⟐-FFFF",
];

/// Is `id` one of the built-in reserved IDs?
pub fn is_builtin_reserved(id: &str) -> bool {
    RESERVED_IDS.contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_reserved() {
        assert!(is_builtin_reserved("Λ0-0000-○-0000"));
        assert!(is_builtin_reserved("LUKHAS5-FFFF-⟐-FFFF"));
        assert!(!is_builtin_reserved("LUKHAS0-0000-○-0001"));
    }
}
