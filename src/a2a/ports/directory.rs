//! Address lookup for peer agents.

use crate::a2a::domain::{AgentEndpoint, AgentId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Resolves agent identifiers to reachable endpoints.
#[async_trait]
pub trait AgentDirectory: Send + Sync {
    /// Returns the endpoint of a reachable agent.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryLookupError::NotFound`] when the agent is unknown
    /// or currently unreachable, or [`DirectoryLookupError::Unavailable`]
    /// when the directory itself fails.
    async fn resolve(&self, id: &AgentId) -> Result<AgentEndpoint, DirectoryLookupError>;
}

/// Errors returned by directory lookups.
#[derive(Debug, Clone, Error)]
pub enum DirectoryLookupError {
    /// No reachable agent has the identifier.
    #[error("no reachable agent with id {0}")]
    NotFound(AgentId),

    /// The directory could not be read.
    #[error("agent directory unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryLookupError {
    /// Wraps a directory backend error.
    #[must_use]
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
