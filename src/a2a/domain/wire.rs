//! JSON bodies exchanged on the A2A routes.
//!
//! | Route                 | Request                | Response                    |
//! |-----------------------|------------------------|-----------------------------|
//! | `GET /health`         | (none)                 | [`HealthResponse`]          |
//! | `GET /capabilities`   | (none)                 | [`CapabilityAdvertisement`] |
//! | `POST /execute`       | [`ExecuteRequest`]     | [`ExecuteResponse`]         |
//! | `POST /a2a/message`   | [`A2aMessageRequest`]  | [`A2aReply`]                |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Route serving liveness probes.
pub const HEALTH_ROUTE: &str = "/health";
/// Route serving the capability advertisement.
pub const CAPABILITIES_ROUTE: &str = "/capabilities";
/// Route accepting user-originated work.
pub const EXECUTE_ROUTE: &str = "/execute";
/// Route accepting peer-originated messages.
pub const MESSAGE_ROUTE: &str = "/a2a/message";

/// Outcome flag carried by every inference-bearing response.
///
/// Unrecognised values decode as [`ResponseStatus::Error`] so a misbehaving
/// agent can never be mistaken for a successful one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The agent produced a response.
    #[serde(alias = "ok", alias = "completed")]
    Success,
    /// The agent failed to produce a response.
    #[serde(other)]
    Error,
}

impl ResponseStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Returns whether the status reports success.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Self-reported health (`healthy`, `degraded`, ...).
    pub status: String,
    /// Display name of the responding agent.
    pub agent_name: String,
}

impl HealthResponse {
    /// Creates a health response.
    #[must_use]
    pub fn new(status: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            agent_name: agent_name.into(),
        }
    }
}

/// Body of `GET /capabilities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityAdvertisement {
    /// Optional stable identifier; derived from `agent_name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Display name of the agent.
    pub agent_name: String,
    /// Declared capability tags.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Self-reported status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `POST /execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    /// Input text for the agent.
    pub input: String,
}

impl ExecuteRequest {
    /// Creates an execute request.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Response of `POST /execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Generated response text.
    pub response: String,
    /// Names of the tools the agent actually invoked.
    #[serde(default)]
    pub tools_used: Vec<String>,
    /// Agent-measured execution time in seconds.
    #[serde(default)]
    pub execution_time: f64,
    /// Outcome flag.
    pub status: ResponseStatus,
}

impl ExecuteResponse {
    /// Creates a successful response.
    #[must_use]
    pub fn success(response: impl Into<String>, tools_used: Vec<String>, elapsed: Duration) -> Self {
        Self {
            response: response.into(),
            tools_used,
            execution_time: elapsed.as_secs_f64(),
            status: ResponseStatus::Success,
        }
    }

    /// Creates an error response carrying a diagnostic message.
    #[must_use]
    pub fn error(message: impl Into<String>, tools_used: Vec<String>, elapsed: Duration) -> Self {
        Self {
            response: message.into(),
            tools_used,
            execution_time: elapsed.as_secs_f64(),
            status: ResponseStatus::Error,
        }
    }

    /// Returns the agent-reported execution time.
    ///
    /// Negative or non-finite values decode as zero.
    #[must_use]
    pub fn execution_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.execution_time).unwrap_or_default()
    }
}

/// Body of `POST /a2a/message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct A2aMessageRequest {
    /// Identifier of the sending agent.
    pub from_agent: String,
    /// Message content.
    pub message: String,
}

impl A2aMessageRequest {
    /// Creates a peer message request.
    #[must_use]
    pub fn new(from_agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            from_agent: from_agent.into(),
            message: message.into(),
        }
    }
}

/// Response of `POST /a2a/message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct A2aReply {
    /// Reply text.
    pub response: String,
    /// Outcome flag.
    pub status: ResponseStatus,
}

impl A2aReply {
    /// Creates a reply.
    #[must_use]
    pub fn new(response: impl Into<String>, status: ResponseStatus) -> Self {
        Self {
            response: response.into(),
            status,
        }
    }
}
