//! Agent availability status.

use super::ParseAgentStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability of a registered agent as last observed by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// The agent answered its last probe and reported itself healthy.
    Active,
    /// The agent reported degraded health, missed fewer probes than the
    /// failure threshold, or has not been probed within the staleness window.
    Degraded,
    /// The agent missed enough consecutive probes to be excluded from
    /// planning.
    Unreachable,
}

impl AgentStatus {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Degraded => "degraded",
            Self::Unreachable => "unreachable",
        }
    }

    /// Maps a self-reported health string onto a status.
    ///
    /// `healthy`, `ok` and `active` map to [`Self::Active`]; anything else
    /// an agent reports about itself is treated as [`Self::Degraded`].
    #[must_use]
    pub fn from_reported_health(reported: &str) -> Self {
        let normalized = reported.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "healthy" | "ok" | "active" => Self::Active,
            _ => Self::Degraded,
        }
    }

    /// Returns whether the agent may be selected for a plan.
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        !matches!(self, Self::Unreachable)
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgentStatus {
    type Error = ParseAgentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "degraded" => Ok(Self::Degraded),
            "unreachable" => Ok(Self::Unreachable),
            _ => Err(ParseAgentStatusError(value.to_owned())),
        }
    }
}
