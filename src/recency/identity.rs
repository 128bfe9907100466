//! Identity keys partitioning recency state per caller.

use std::fmt;

use crate::error::{RecentsError, RecentsResult};

/// A trimmed, non-empty identity string.
///
/// Empty identities would merge the state of unrelated callers, so they are
/// refused at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Parses an identity supplied by the identity provider.
    ///
    /// # Returns
    ///
    /// * `Ok(IdentityKey)` for a non-blank identity
    /// * `Err(RecentsError::MissingIdentity)` otherwise
    pub fn parse(raw: &str) -> RecentsResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RecentsError::MissingIdentity);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for IdentityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for IdentityKey {
    type Error = RecentsError;

    fn try_from(raw: &str) -> RecentsResult<Self> {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("" ; "empty")]
    #[test_case("   " ; "blank")]
    fn test_blank_identity_refused(raw: &str) {
        assert!(matches!(
            IdentityKey::parse(raw),
            Err(RecentsError::MissingIdentity)
        ));
    }

    #[test]
    fn test_identity_trimmed() {
        let key = IdentityKey::try_from("  guest:42 ").unwrap();
        assert_eq!(key.as_str(), "guest:42");
        assert_eq!(key.to_string(), "guest:42");
    }
}
