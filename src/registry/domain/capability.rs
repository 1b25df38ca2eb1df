//! Capability tags.

use super::RegistryDomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Normalised capability tag such as `calculator` or `summarize`.
///
/// Tags are trimmed and lowercased, so `Calculator` and ` calculator ` are
/// the same capability.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Capability(String);

impl Capability {
    /// Creates a validated capability tag.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyCapability`] when the tag is
    /// blank or [`RegistryDomainError::InvalidCapability`] when it contains
    /// whitespace or control characters.
    pub fn new(value: &str) -> Result<Self, RegistryDomainError> {
        let normalized = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(RegistryDomainError::EmptyCapability);
        }

        if normalized
            .chars()
            .any(|character| character.is_whitespace() || character.is_control())
        {
            return Err(RegistryDomainError::InvalidCapability(normalized));
        }

        Ok(Self(normalized))
    }

    /// Builds a capability set, dropping duplicates.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryDomainError`] raised by an invalid tag.
    pub fn set_from<I, S>(tags: I) -> Result<BTreeSet<Self>, RegistryDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter().map(|tag| Self::new(tag.as_ref())).collect()
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Capability {
    type Error = RegistryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Capability> for String {
    fn from(value: Capability) -> Self {
        value.0
    }
}
