//! Identifier and address types shared by every A2A participant.

use super::A2aDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum length for an agent identifier.
const MAX_AGENT_ID_LENGTH: usize = 100;

/// Opaque, stable agent identifier.
///
/// Identifiers are trimmed but otherwise kept verbatim, so `math-agent` and
/// `Math-Agent` are distinct agents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentId(String);

impl AgentId {
    /// Creates a validated agent identifier.
    ///
    /// # Errors
    ///
    /// Returns [`A2aDomainError::EmptyAgentId`] when the value is blank,
    /// [`A2aDomainError::InvalidAgentId`] when it contains whitespace or
    /// control characters, or [`A2aDomainError::AgentIdTooLong`] when it
    /// exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, A2aDomainError> {
        let normalized = value.into().trim().to_owned();

        if normalized.is_empty() {
            return Err(A2aDomainError::EmptyAgentId);
        }

        if normalized.chars().count() > MAX_AGENT_ID_LENGTH {
            return Err(A2aDomainError::AgentIdTooLong(normalized));
        }

        let is_valid = normalized
            .chars()
            .all(|character| !character.is_whitespace() && !character.is_control());
        if !is_valid {
            return Err(A2aDomainError::InvalidAgentId(normalized));
        }

        Ok(Self(normalized))
    }

    /// Derives an identifier from a human-readable agent name.
    ///
    /// Alphanumeric runs are lowercased and joined with `-`, so
    /// `"Math Agent"` becomes `math-agent`.
    ///
    /// # Errors
    ///
    /// Returns [`A2aDomainError`] when the name contains no alphanumeric
    /// characters or the slug is too long.
    pub fn slugify(name: &str) -> Result<Self, A2aDomainError> {
        let slug = name
            .split(|character: char| !character.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        Self::new(slug)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AgentId {
    type Error = A2aDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentId> for String {
    fn from(value: AgentId) -> Self {
        value.0
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Base URL at which an agent's A2A handlers are reachable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentEndpoint(String);

impl AgentEndpoint {
    /// Creates a validated endpoint.
    ///
    /// The value is trimmed and trailing `/` characters are removed so that
    /// route paths can be appended directly.
    ///
    /// # Errors
    ///
    /// Returns [`A2aDomainError::EmptyEndpoint`] when the value is blank or
    /// [`A2aDomainError::InvalidEndpoint`] when it lacks an `http://` or
    /// `https://` prefix.
    pub fn new(value: impl Into<String>) -> Result<Self, A2aDomainError> {
        let trimmed = value.into();
        let normalized = trimmed.trim().trim_end_matches('/').to_owned();
        if normalized.is_empty() {
            return Err(A2aDomainError::EmptyEndpoint);
        }

        let has_valid_prefix =
            normalized.starts_with("http://") || normalized.starts_with("https://");
        if !has_valid_prefix {
            return Err(A2aDomainError::InvalidEndpoint(normalized));
        }

        Ok(Self(normalized))
    }

    /// Returns the base URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the absolute URL of a route on this endpoint.
    #[must_use]
    pub fn route(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl TryFrom<String> for AgentEndpoint {
    type Error = A2aDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentEndpoint> for String {
    fn from(value: AgentEndpoint) -> Self {
        value.0
    }
}

impl fmt::Display for AgentEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Unique identifier for a single A2A message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random message identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
