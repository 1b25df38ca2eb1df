//! Registry timing and health policy.

use chrono::TimeDelta;
use std::time::Duration;

/// Health-check and discovery policy for the agent registry.
///
/// # Examples
///
/// ```
/// use baton::registry::services::RegistryConfig;
/// use std::time::Duration;
///
/// let config = RegistryConfig::default();
/// assert_eq!(config.health_interval, Duration::from_secs(30));
/// assert_eq!(config.failure_threshold, 3);
///
/// let aggressive = RegistryConfig::aggressive();
/// assert!(aggressive.health_interval < config.health_interval);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Period of the background health monitor.
    pub health_interval: Duration,
    /// Age after which an unprobed active agent is reported as degraded.
    pub staleness_window: Duration,
    /// Consecutive failed probes that mark an agent unreachable.
    pub failure_threshold: u32,
    /// Continuous unreachability after which an agent is pruned.
    pub eviction_after: Duration,
    /// Deadline for `GET /capabilities` during discovery.
    pub discovery_timeout: Duration,
    /// Deadline for one `GET /health` probe.
    pub health_timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            health_interval: Duration::from_secs(30),
            staleness_window: Duration::from_secs(90),
            failure_threshold: 3,
            eviction_after: Duration::from_secs(600),
            discovery_timeout: Duration::from_secs(10),
            health_timeout: Duration::from_secs(5),
        }
    }
}

impl RegistryConfig {
    /// Short intervals for local development and tests.
    #[must_use]
    pub const fn aggressive() -> Self {
        Self {
            health_interval: Duration::from_secs(5),
            staleness_window: Duration::from_secs(15),
            failure_threshold: 2,
            eviction_after: Duration::from_secs(60),
            discovery_timeout: Duration::from_secs(3),
            health_timeout: Duration::from_secs(2),
        }
    }

    pub(crate) fn staleness_delta(&self) -> TimeDelta {
        TimeDelta::from_std(self.staleness_window).unwrap_or(TimeDelta::MAX)
    }

    pub(crate) fn eviction_delta(&self) -> TimeDelta {
        TimeDelta::from_std(self.eviction_after).unwrap_or(TimeDelta::MAX)
    }
}
