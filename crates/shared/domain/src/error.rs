//! Domain-level errors.
//!
//! These errors represent malformed domain values. They are independent of
//! infrastructure concerns (document store, blob store, identity provider).

use thiserror::Error;

/// Domain-specific errors for malformed values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A label did not match any variant of an enumerated field
    #[error("Unknown {kind}: {value} (expected one of: {expected})")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

impl DomainError {
    /// Create an unknown-variant error listing the accepted labels
    pub fn unknown_variant(
        kind: &'static str,
        value: impl Into<String>,
        accepted: &[&str],
    ) -> Self {
        DomainError::UnknownVariant {
            kind,
            value: value.into(),
            expected: accepted.join(", "),
        }
    }
}
