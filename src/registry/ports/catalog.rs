//! Catalog port holding the registry's agent descriptors.

use crate::a2a::domain::{AgentEndpoint, AgentId};
use crate::registry::domain::AgentDescriptor;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Immutable, versioned view of the catalog.
///
/// Every successful write produces a new snapshot with a higher version;
/// readers holding an older snapshot are unaffected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    version: u64,
    agents: BTreeMap<AgentId, AgentDescriptor>,
}

impl CatalogSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(version: u64, agents: BTreeMap<AgentId, AgentDescriptor>) -> Self {
        Self { version, agents }
    }

    /// Returns the snapshot version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the descriptor for `id`.
    #[must_use]
    pub fn get(&self, id: &AgentId) -> Option<&AgentDescriptor> {
        self.agents.get(id)
    }

    /// Iterates over descriptors in identifier order.
    pub fn agents(&self) -> impl Iterator<Item = &AgentDescriptor> {
        self.agents.values()
    }

    /// Returns the number of agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Returns whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No entry existed for the identifier.
    Inserted,
    /// An existing entry was replaced.
    Updated,
    /// The existing entry already carried the same registration data.
    Unchanged,
}

/// Change applied atomically to one descriptor.
pub type DescriptorChange<'a> = &'a (dyn Fn(&mut AgentDescriptor) + Send + Sync);

/// Storage contract for agent descriptors.
#[async_trait]
pub trait AgentCatalog: Send + Sync {
    /// Returns the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] when the catalog cannot be read.
    async fn snapshot(&self) -> CatalogResult<Arc<CatalogSnapshot>>;

    /// Inserts or replaces a descriptor keyed by its identifier.
    ///
    /// Replacement keeps the existing `registered_at`; identical data leaves
    /// the entry untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Conflict`] when the existing entry
    /// [conflicts](AgentDescriptor::conflicts_with) with the candidate, or
    /// [`CatalogError::Storage`] when the catalog cannot be written.
    async fn upsert(&self, descriptor: AgentDescriptor) -> CatalogResult<UpsertOutcome>;

    /// Applies `change` to the descriptor for `id` and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no entry exists, or
    /// [`CatalogError::Storage`] when the catalog cannot be written.
    async fn modify(
        &self,
        id: &AgentId,
        change: DescriptorChange<'_>,
    ) -> CatalogResult<AgentDescriptor>;

    /// Removes the descriptor for `id`, returning it when present.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] when the catalog cannot be written.
    async fn remove(&self, id: &AgentId) -> CatalogResult<Option<AgentDescriptor>>;
}

/// Errors returned by catalog implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// An active entry with different endpoint and capabilities exists.
    #[error("agent {id} is already registered at {existing_endpoint} with different capabilities")]
    Conflict {
        /// Conflicting identifier.
        id: AgentId,
        /// Endpoint of the existing entry.
        existing_endpoint: AgentEndpoint,
    },

    /// No entry exists for the identifier.
    #[error("agent not found: {0}")]
    NotFound(AgentId),

    /// The backing store failed.
    #[error("catalog storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogError {
    /// Wraps a storage error.
    #[must_use]
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
