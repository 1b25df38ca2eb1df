//! Agent descriptor aggregate root.

use super::{AgentStatus, Capability, RegistryDomainError};
use crate::a2a::domain::{AgentEndpoint, AgentId, CapabilityAdvertisement};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A capability-tagged agent known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    id: AgentId,
    name: String,
    description: String,
    capabilities: BTreeSet<Capability>,
    endpoint: AgentEndpoint,
    status: AgentStatus,
    consecutive_failures: u32,
    last_checked_at: Option<DateTime<Utc>>,
    unreachable_since: Option<DateTime<Utc>>,
    registered_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AgentDescriptor {
    /// Creates an `Active` descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyAgentName`] when `name` is blank.
    pub fn new(
        id: AgentId,
        name: &str,
        endpoint: AgentEndpoint,
        capabilities: BTreeSet<Capability>,
        clock: &impl Clock,
    ) -> Result<Self, RegistryDomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RegistryDomainError::EmptyAgentName);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            description: String::new(),
            capabilities,
            endpoint,
            status: AgentStatus::Active,
            consecutive_failures: 0,
            last_checked_at: None,
            unreachable_since: None,
            registered_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Builds a descriptor from a `GET /capabilities` advertisement.
    ///
    /// The identifier is the advertised `agent_id` when present, otherwise a
    /// slug of `agent_name`. A self-reported status is honoured; `active`
    /// is assumed when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError`] when the name is blank, no valid
    /// identifier can be derived, or a capability tag is invalid.
    pub fn from_advertisement(
        advertisement: &CapabilityAdvertisement,
        endpoint: AgentEndpoint,
        clock: &impl Clock,
    ) -> Result<Self, RegistryDomainError> {
        let name = advertisement.agent_name.trim();
        if name.is_empty() {
            return Err(RegistryDomainError::EmptyAgentName);
        }

        let id = match advertisement.agent_id.as_deref().map(str::trim) {
            Some(advertised) if !advertised.is_empty() => AgentId::new(advertised)?,
            _ => AgentId::slugify(name)?,
        };
        let capabilities = Capability::set_from(&advertisement.capabilities)?;
        let status = advertisement
            .status
            .as_deref()
            .map_or(AgentStatus::Active, AgentStatus::from_reported_health);

        let mut descriptor = Self::new(id, name, endpoint, capabilities, clock)?
            .with_description(advertisement.description.trim());
        descriptor.status = status;
        Ok(descriptor)
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the agent identifier.
    #[must_use]
    pub const fn id(&self) -> &AgentId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the capability set.
    #[must_use]
    pub const fn capabilities(&self) -> &BTreeSet<Capability> {
        &self.capabilities
    }

    /// Returns whether the agent declares `capability`.
    #[must_use]
    pub fn has_capability(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// Returns the base endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &AgentEndpoint {
        &self.endpoint
    }

    /// Returns the stored status.
    #[must_use]
    pub const fn status(&self) -> AgentStatus {
        self.status
    }

    /// Returns the number of health probes failed in a row.
    #[must_use]
    pub const fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Returns when the agent was last probed, successfully or not.
    #[must_use]
    pub const fn last_checked_at(&self) -> Option<DateTime<Utc>> {
        self.last_checked_at
    }

    /// Returns when the agent became unreachable, if it is.
    #[must_use]
    pub const fn unreachable_since(&self) -> Option<DateTime<Utc>> {
        self.unreachable_since
    }

    /// Returns the first registration timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether registering `candidate` over `self` must be refused.
    ///
    /// A conflict requires the existing entry to be active and both the
    /// endpoint and the capability set to differ.
    #[must_use]
    pub fn conflicts_with(&self, candidate: &Self) -> bool {
        self.status == AgentStatus::Active
            && self.endpoint != candidate.endpoint
            && self.capabilities != candidate.capabilities
    }

    /// Returns whether `candidate` carries the same registration data.
    ///
    /// Health bookkeeping and timestamps are ignored.
    #[must_use]
    pub fn same_registration(&self, candidate: &Self) -> bool {
        self.id == candidate.id
            && self.name == candidate.name
            && self.description == candidate.description
            && self.capabilities == candidate.capabilities
            && self.endpoint == candidate.endpoint
    }

    /// Folds a re-registration of the same agent into this entry.
    ///
    /// The original `registered_at` is kept; everything else, including
    /// health bookkeeping, is taken from the candidate.
    pub fn absorb(&mut self, candidate: Self) {
        let registered_at = self.registered_at;
        *self = candidate;
        self.registered_at = registered_at;
    }

    /// Records a successful health probe.
    pub fn record_probe_success(&mut self, status: AgentStatus, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.consecutive_failures = 0;
        self.unreachable_since = None;
        self.status = status;
        self.last_checked_at = Some(timestamp);
        self.updated_at = timestamp;
    }

    /// Records a failed health probe.
    ///
    /// Reaching `failure_threshold` consecutive failures marks the agent
    /// unreachable; fewer mark it degraded.
    pub fn record_probe_failure(&mut self, failure_threshold: u32, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.last_checked_at = Some(timestamp);
        self.updated_at = timestamp;

        if self.consecutive_failures >= failure_threshold.max(1) {
            if self.status != AgentStatus::Unreachable {
                self.unreachable_since = Some(timestamp);
            }
            self.status = AgentStatus::Unreachable;
        } else {
            self.status = AgentStatus::Degraded;
        }
    }

    /// Returns the status to report at `now`.
    ///
    /// An active agent whose last probe (or registration, if never probed)
    /// is older than `staleness_window` is reported as degraded.
    #[must_use]
    pub fn effective_status(&self, now: DateTime<Utc>, staleness_window: TimeDelta) -> AgentStatus {
        if self.status != AgentStatus::Active {
            return self.status;
        }
        let last_seen = self.last_checked_at.unwrap_or(self.updated_at);
        if now.signed_duration_since(last_seen) > staleness_window {
            AgentStatus::Degraded
        } else {
            AgentStatus::Active
        }
    }

    /// Returns a copy carrying the status to report at `now`.
    #[must_use]
    pub fn observed_at(&self, now: DateTime<Utc>, staleness_window: TimeDelta) -> Self {
        let mut observed = self.clone();
        observed.status = self.effective_status(now, staleness_window);
        observed
    }

    /// Returns whether the agent has been unreachable for longer than
    /// `eviction_after` at `now`.
    #[must_use]
    pub fn is_evictable(&self, now: DateTime<Utc>, eviction_after: TimeDelta) -> bool {
        self.unreachable_since
            .is_some_and(|since| now.signed_duration_since(since) >= eviction_after)
    }
}
