//! Service layer for agent registration, discovery and health tracking.
//!
//! Provides [`AgentRegistryService`], which owns the catalog of known agents
//! and keeps each agent's status current through `GET /health` probes.

use super::RegistryConfig;
use crate::a2a::{
    domain::{AgentEndpoint, AgentId},
    ports::{AgentClient, AgentClientError, AgentDirectory, DirectoryLookupError},
};
use crate::registry::{
    domain::{AgentDescriptor, AgentStatus, Capability},
    ports::{AgentCatalog, CatalogError},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for registry operations.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The endpoint could not be reached or answered with an HTTP error.
    #[error("agent endpoint {endpoint} is unreachable: {reason}")]
    UnreachableEndpoint {
        /// Endpoint that was contacted.
        endpoint: AgentEndpoint,
        /// Transport diagnostic.
        reason: String,
    },

    /// The capability advertisement could not be used.
    #[error("agent endpoint {endpoint} returned a malformed advertisement: {reason}")]
    MalformedAdvertisement {
        /// Endpoint that was contacted.
        endpoint: AgentEndpoint,
        /// Decoder or validation diagnostic.
        reason: String,
    },

    /// An active agent with the same id, a different endpoint and different
    /// capabilities is already registered.
    #[error("agent {id} is already registered at {existing_endpoint} with different capabilities")]
    DuplicateConflict {
        /// Conflicting identifier.
        id: AgentId,
        /// Endpoint of the existing registration.
        existing_endpoint: AgentEndpoint,
    },

    /// No agent has the identifier.
    #[error("agent not found: {0}")]
    NotFound(AgentId),

    /// The catalog failed.
    #[error(transparent)]
    Catalog(CatalogError),
}

impl From<CatalogError> for RegistryError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Conflict {
                id,
                existing_endpoint,
            } => Self::DuplicateConflict {
                id,
                existing_endpoint,
            },
            CatalogError::NotFound(id) => Self::NotFound(id),
            CatalogError::Storage(_) => Self::Catalog(err),
        }
    }
}

/// Result type for registry service operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Selection criteria for [`AgentRegistryService::list`].
///
/// Unreachable agents are excluded unless explicitly requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentFilter {
    capability: Option<Capability>,
    status: Option<AgentStatus>,
    include_unreachable: bool,
}

impl AgentFilter {
    /// Matches every reachable agent.
    #[must_use]
    pub fn reachable() -> Self {
        Self::default()
    }

    /// Restricts results to agents declaring `capability`.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capability = Some(capability);
        self
    }

    /// Restricts results to agents reported with `status`.
    #[must_use]
    pub const fn with_status(mut self, status: AgentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Includes unreachable agents.
    #[must_use]
    pub const fn including_unreachable(mut self) -> Self {
        self.include_unreachable = true;
        self
    }

    fn matches(&self, descriptor: &AgentDescriptor) -> bool {
        let status = descriptor.status();
        let reachable_ok = self.include_unreachable
            || status.is_selectable()
            || self.status == Some(AgentStatus::Unreachable);
        let status_ok = self.status.is_none_or(|wanted| wanted == status);
        let capability_ok = self
            .capability
            .as_ref()
            .is_none_or(|wanted| descriptor.has_capability(wanted));
        reachable_ok && status_ok && capability_ok
    }
}

/// Result of probing one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// Probed agent.
    pub agent_id: AgentId,
    /// Status after the probe.
    pub status: AgentStatus,
}

/// Agent registration, discovery and health service.
pub struct AgentRegistryService<K, A, C>
where
    K: AgentCatalog,
    A: AgentClient,
    C: Clock + Send + Sync,
{
    catalog: Arc<K>,
    client: Arc<A>,
    clock: Arc<C>,
    config: RegistryConfig,
}

impl<K, A, C> Clone for AgentRegistryService<K, A, C>
where
    K: AgentCatalog,
    A: AgentClient,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            client: Arc::clone(&self.client),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<K, A, C> AgentRegistryService<K, A, C>
where
    K: AgentCatalog,
    A: AgentClient,
    C: Clock + Send + Sync,
{
    /// Creates a registry service.
    #[must_use]
    pub const fn new(
        catalog: Arc<K>,
        client: Arc<A>,
        clock: Arc<C>,
        config: RegistryConfig,
    ) -> Self {
        Self {
            catalog,
            client,
            clock,
            config,
        }
    }

    /// Returns the registry policy.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers or refreshes an agent.
    ///
    /// Re-registering identical data keeps the single existing entry and
    /// its original registration time.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateConflict`] when an active agent
    /// with the same id but a different endpoint and capability set exists,
    /// or [`RegistryError::Catalog`] when the catalog fails.
    pub async fn register(&self, descriptor: AgentDescriptor) -> RegistryResult<AgentId> {
        let id = descriptor.id().clone();
        let outcome = self.catalog.upsert(descriptor).await?;
        tracing::info!(agent_id = %id, ?outcome, "agent registered");
        Ok(id)
    }

    /// Fetches an agent's capability advertisement and registers it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnreachableEndpoint`] when the endpoint
    /// cannot be reached, [`RegistryError::MalformedAdvertisement`] when the
    /// response is undecodable or invalid, or any error from
    /// [`Self::register`].
    pub async fn discover(&self, endpoint: &AgentEndpoint) -> RegistryResult<AgentDescriptor> {
        let advertisement = self
            .client
            .capabilities(endpoint, self.config.discovery_timeout)
            .await
            .map_err(|err| discovery_error(endpoint, &err))?;

        let descriptor =
            AgentDescriptor::from_advertisement(&advertisement, endpoint.clone(), &*self.clock)
                .map_err(|err| RegistryError::MalformedAdvertisement {
                    endpoint: endpoint.clone(),
                    reason: err.to_string(),
                })?;

        let id = self.register(descriptor).await?;
        self.find(&id)
            .await?
            .ok_or(RegistryError::NotFound(id))
    }

    /// Lists agents matching `filter` in identifier order.
    ///
    /// Reads the current snapshot without network I/O. Active agents not
    /// probed within the staleness window are reported as degraded.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Catalog`] when the catalog cannot be read.
    pub async fn list(&self, filter: &AgentFilter) -> RegistryResult<Vec<AgentDescriptor>> {
        let snapshot = self.catalog.snapshot().await?;
        let now = self.clock.utc();
        let window = self.config.staleness_delta();

        Ok(snapshot
            .agents()
            .map(|descriptor| descriptor.observed_at(now, window))
            .filter(|descriptor| filter.matches(descriptor))
            .collect())
    }

    /// Finds an agent by identifier, with staleness applied.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Catalog`] when the catalog cannot be read.
    pub async fn find(&self, id: &AgentId) -> RegistryResult<Option<AgentDescriptor>> {
        let snapshot = self.catalog.snapshot().await?;
        let now = self.clock.utc();
        Ok(snapshot
            .get(id)
            .map(|descriptor| descriptor.observed_at(now, self.config.staleness_delta())))
    }

    /// Removes an agent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when the agent is unknown, or
    /// [`RegistryError::Catalog`] when the catalog fails.
    pub async fn deregister(&self, id: &AgentId) -> RegistryResult<AgentDescriptor> {
        let removed = self
            .catalog
            .remove(id)
            .await?
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        tracing::info!(agent_id = %id, "agent deregistered");
        Ok(removed)
    }

    /// Probes one agent and records the outcome.
    ///
    /// The outcome is dropped when the agent was re-registered at another
    /// endpoint while the probe was in flight.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when the agent is unknown, or
    /// [`RegistryError::Catalog`] when the catalog fails. Probe failures are
    /// recorded on the descriptor, not returned.
    pub async fn health_check(&self, id: &AgentId) -> RegistryResult<AgentStatus> {
        let snapshot = self.catalog.snapshot().await?;
        let endpoint = snapshot
            .get(id)
            .map(|descriptor| descriptor.endpoint().clone())
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        drop(snapshot);

        let probe = self
            .client
            .health(&endpoint, self.config.health_timeout)
            .await;

        let clock = Arc::clone(&self.clock);
        let threshold = self.config.failure_threshold;
        let probed = endpoint.clone();
        let updated = match probe {
            Ok(health) => {
                let reported = AgentStatus::from_reported_health(&health.status);
                self.catalog
                    .modify(id, &move |descriptor: &mut AgentDescriptor| {
                        if descriptor.endpoint() == &probed {
                            descriptor.record_probe_success(reported, &*clock);
                        }
                    })
                    .await?
            }
            Err(err) => {
                tracing::warn!(agent_id = %id, error = %err, "health probe failed");
                self.catalog
                    .modify(id, &move |descriptor: &mut AgentDescriptor| {
                        if descriptor.endpoint() == &probed {
                            descriptor.record_probe_failure(threshold, &*clock);
                        }
                    })
                    .await?
            }
        };

        if updated.endpoint() != &endpoint {
            tracing::debug!(
                agent_id = %id,
                probed = %endpoint,
                current = %updated.endpoint(),
                "discarded probe of a replaced endpoint"
            );
        } else {
            tracing::debug!(
                agent_id = %id,
                status = %updated.status(),
                consecutive_failures = updated.consecutive_failures(),
                "health probe recorded"
            );
        }
        Ok(updated.status())
    }

    /// Probes every registered agent, one after another.
    ///
    /// Agents removed while the sweep runs are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Catalog`] when the catalog fails.
    pub async fn health_check_all(&self) -> RegistryResult<Vec<HealthReport>> {
        let snapshot = self.catalog.snapshot().await?;
        let ids: Vec<AgentId> = snapshot
            .agents()
            .map(|descriptor| descriptor.id().clone())
            .collect();
        drop(snapshot);

        let mut reports = Vec::with_capacity(ids.len());
        for agent_id in ids {
            match self.health_check(&agent_id).await {
                Ok(status) => reports.push(HealthReport { agent_id, status }),
                Err(RegistryError::NotFound(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(reports)
    }

    /// Removes agents unreachable for longer than the eviction window.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Catalog`] when the catalog fails.
    pub async fn prune_unreachable(&self) -> RegistryResult<Vec<AgentId>> {
        let snapshot = self.catalog.snapshot().await?;
        let now = self.clock.utc();
        let eviction = self.config.eviction_delta();
        let evictable: Vec<AgentId> = snapshot
            .agents()
            .filter(|descriptor| descriptor.is_evictable(now, eviction))
            .map(|descriptor| descriptor.id().clone())
            .collect();
        drop(snapshot);

        let mut pruned = Vec::with_capacity(evictable.len());
        for agent_id in evictable {
            if self.catalog.remove(&agent_id).await?.is_some() {
                tracing::info!(agent_id = %agent_id, "evicted unreachable agent");
                pruned.push(agent_id);
            }
        }
        Ok(pruned)
    }

    /// Returns the current catalog version.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Catalog`] when the catalog cannot be read.
    pub async fn snapshot_version(&self) -> RegistryResult<u64> {
        Ok(self.catalog.snapshot().await?.version())
    }
}

fn discovery_error(endpoint: &AgentEndpoint, err: &AgentClientError) -> RegistryError {
    if err.is_decode() {
        return RegistryError::MalformedAdvertisement {
            endpoint: endpoint.clone(),
            reason: err.to_string(),
        };
    }
    RegistryError::UnreachableEndpoint {
        endpoint: endpoint.clone(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl<K, A, C> AgentDirectory for AgentRegistryService<K, A, C>
where
    K: AgentCatalog,
    A: AgentClient,
    C: Clock + Send + Sync,
{
    async fn resolve(&self, id: &AgentId) -> Result<AgentEndpoint, DirectoryLookupError> {
        let descriptor = self
            .find(id)
            .await
            .map_err(DirectoryLookupError::unavailable)?
            .filter(|descriptor| descriptor.status().is_selectable())
            .ok_or_else(|| DirectoryLookupError::NotFound(id.clone()))?;
        Ok(descriptor.endpoint().clone())
    }
}
