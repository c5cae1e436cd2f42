//! Error types for the enchantlore domain.
//!
//! The display engine itself never fails; errors only arise at the edges
//! where catalogs are assembled. Configuration wraps these in its own
//! `ConfigError`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Tag already registered: {0}")]
    DuplicateKey(String),

    #[error("Invalid tag key: {0:?}")]
    InvalidKey(String),

    #[error("Invalid definition for {key}: {reason}")]
    InvalidDefinition { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_definition_displays_key_and_reason() {
        let err = CatalogError::InvalidDefinition {
            key: "ecoenchants:cubism".into(),
            reason: "max level must be at least 1".into(),
        };
        assert!(err.to_string().contains("cubism"));
        assert!(err.to_string().contains("max level"));
    }

    #[test]
    fn invalid_key_is_quoted() {
        let err = CatalogError::InvalidKey("a:b:c".into());
        assert_eq!(err.to_string(), "Invalid tag key: \"a:b:c\"");
    }
}
