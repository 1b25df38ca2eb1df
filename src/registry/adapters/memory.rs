//! Copy-on-write in-memory agent catalog.

use crate::a2a::domain::AgentId;
use crate::registry::{
    domain::AgentDescriptor,
    ports::{
        AgentCatalog, CatalogError, CatalogResult, CatalogSnapshot, DescriptorChange,
        UpsertOutcome,
    },
};
use async_trait::async_trait;
use std::collections::{BTreeMap, btree_map::Entry};
use std::sync::{Arc, RwLock};

/// Thread-safe catalog publishing immutable snapshots.
///
/// Readers clone the current `Arc` and release the lock at once. Writers
/// copy the map, apply their change and publish a snapshot with the next
/// version number.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAgentCatalog {
    current: Arc<RwLock<Arc<CatalogSnapshot>>>,
}

impl InMemoryAgentCatalog {
    /// Creates an empty catalog at version 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn publish<T>(
        &self,
        update: impl FnOnce(&mut BTreeMap<AgentId, AgentDescriptor>) -> CatalogResult<(T, bool)>,
    ) -> CatalogResult<T> {
        let mut current = self
            .current
            .write()
            .map_err(|err| CatalogError::storage(std::io::Error::other(err.to_string())))?;

        let mut agents: BTreeMap<AgentId, AgentDescriptor> = current
            .agents()
            .map(|descriptor| (descriptor.id().clone(), descriptor.clone()))
            .collect();
        let (value, changed) = update(&mut agents)?;

        if changed {
            let version = current.version().saturating_add(1);
            *current = Arc::new(CatalogSnapshot::new(version, agents));
        }
        Ok(value)
    }
}

#[async_trait]
impl AgentCatalog for InMemoryAgentCatalog {
    async fn snapshot(&self) -> CatalogResult<Arc<CatalogSnapshot>> {
        let current = self
            .current
            .read()
            .map_err(|err| CatalogError::storage(std::io::Error::other(err.to_string())))?;
        Ok(Arc::clone(&current))
    }

    async fn upsert(&self, descriptor: AgentDescriptor) -> CatalogResult<UpsertOutcome> {
        self.publish(|agents| match agents.entry(descriptor.id().clone()) {
            Entry::Vacant(slot) => {
                slot.insert(descriptor);
                Ok((UpsertOutcome::Inserted, true))
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing.same_registration(&descriptor) {
                    return Ok((UpsertOutcome::Unchanged, false));
                }
                if existing.conflicts_with(&descriptor) {
                    return Err(CatalogError::Conflict {
                        id: existing.id().clone(),
                        existing_endpoint: existing.endpoint().clone(),
                    });
                }
                existing.absorb(descriptor);
                Ok((UpsertOutcome::Updated, true))
            }
        })
    }

    async fn modify(
        &self,
        id: &AgentId,
        change: DescriptorChange<'_>,
    ) -> CatalogResult<AgentDescriptor> {
        self.publish(|agents| {
            let descriptor = agents
                .get_mut(id)
                .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
            change(descriptor);
            Ok((descriptor.clone(), true))
        })
    }

    async fn remove(&self, id: &AgentId) -> CatalogResult<Option<AgentDescriptor>> {
        self.publish(|agents| {
            let removed = agents.remove(id);
            let changed = removed.is_some();
            Ok((removed, changed))
        })
    }
}
