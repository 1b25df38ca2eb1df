//! Error types for A2A protocol domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing A2A domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum A2aDomainError {
    /// The agent identifier is empty after trimming.
    #[error("agent id must not be empty")]
    EmptyAgentId,

    /// The agent identifier contains whitespace or control characters.
    #[error("agent id '{0}' must not contain whitespace or control characters")]
    InvalidAgentId(String),

    /// The agent identifier exceeds the 100-character limit.
    #[error("agent id exceeds 100 character limit: {0}")]
    AgentIdTooLong(String),

    /// The endpoint URL is empty after trimming.
    #[error("agent endpoint must not be empty")]
    EmptyEndpoint,

    /// The endpoint URL does not have an `http://` or `https://` prefix.
    #[error("agent endpoint '{0}' must start with 'http://' or 'https://'")]
    InvalidEndpoint(String),
}

