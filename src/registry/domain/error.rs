//! Error types for registry domain validation and parsing.

use crate::a2a::domain::A2aDomainError;
use thiserror::Error;

/// Errors returned while constructing registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryDomainError {
    /// The agent name is empty after trimming.
    #[error("agent name must not be empty")]
    EmptyAgentName,

    /// A capability tag is empty after trimming.
    #[error("capability tag must not be empty")]
    EmptyCapability,

    /// A capability tag contains whitespace or control characters.
    #[error("capability tag '{0}' must not contain whitespace or control characters")]
    InvalidCapability(String),

    /// An identifier or endpoint failed protocol validation.
    #[error(transparent)]
    Protocol(#[from] A2aDomainError),
}

/// Error returned while parsing an agent status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent status: {0}")]
pub struct ParseAgentStatusError(pub String);
