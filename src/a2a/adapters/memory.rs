//! In-process agent network for tests and local orchestration flows.

use crate::a2a::{
    domain::{
        A2aMessageRequest, A2aReply, AgentEndpoint, CapabilityAdvertisement, ExecuteRequest,
        ExecuteResponse, HealthResponse,
    },
    ports::{A2aOperation, AgentClient, AgentClientError, AgentClientResult, AgentHandler},
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;

/// Error returned when the network state lock is poisoned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("in-memory agent network state is poisoned: {0}")]
pub struct InMemoryNetworkError(String);

/// Routes A2A calls to [`AgentHandler`]s mounted at endpoints.
///
/// No sockets are opened. Faults can be injected per endpoint: an endpoint
/// can be made unreachable, answer with an HTTP error code, or respond
/// after an artificial latency (which counts against the caller's deadline).
#[derive(Clone, Default)]
pub struct InMemoryAgentNetwork {
    state: Arc<RwLock<NetworkState>>,
}

#[derive(Default)]
struct NetworkState {
    handlers: HashMap<AgentEndpoint, Arc<dyn AgentHandler>>,
    unreachable: HashSet<AgentEndpoint>,
    http_errors: HashMap<AgentEndpoint, u16>,
    latency: HashMap<AgentEndpoint, Duration>,
}

struct Route {
    handler: Arc<dyn AgentHandler>,
    latency: Duration,
}

impl InMemoryAgentNetwork {
    /// Creates an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a handler at an endpoint, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryNetworkError`] when lock acquisition fails.
    pub fn mount(
        &self,
        endpoint: AgentEndpoint,
        handler: Arc<dyn AgentHandler>,
    ) -> Result<(), InMemoryNetworkError> {
        self.with_state(|state| {
            state.handlers.insert(endpoint, handler);
        })
    }

    /// Removes the handler at an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryNetworkError`] when lock acquisition fails.
    pub fn unmount(&self, endpoint: &AgentEndpoint) -> Result<(), InMemoryNetworkError> {
        self.with_state(|state| {
            state.handlers.remove(endpoint);
        })
    }

    /// Makes an endpoint refuse connections, or restores it.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryNetworkError`] when lock acquisition fails.
    pub fn set_unreachable(
        &self,
        endpoint: &AgentEndpoint,
        unreachable: bool,
    ) -> Result<(), InMemoryNetworkError> {
        self.with_state(|state| {
            if unreachable {
                state.unreachable.insert(endpoint.clone());
            } else {
                state.unreachable.remove(endpoint);
            }
        })
    }

    /// Makes an endpoint answer every call with an HTTP error status.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryNetworkError`] when lock acquisition fails.
    pub fn set_http_error(
        &self,
        endpoint: &AgentEndpoint,
        code: u16,
    ) -> Result<(), InMemoryNetworkError> {
        self.with_state(|state| {
            state.http_errors.insert(endpoint.clone(), code);
        })
    }

    /// Delays every response from an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryNetworkError`] when lock acquisition fails.
    pub fn set_latency(
        &self,
        endpoint: &AgentEndpoint,
        latency: Duration,
    ) -> Result<(), InMemoryNetworkError> {
        self.with_state(|state| {
            state.latency.insert(endpoint.clone(), latency);
        })
    }

    fn with_state(
        &self,
        update: impl FnOnce(&mut NetworkState),
    ) -> Result<(), InMemoryNetworkError> {
        let mut state = self
            .state
            .write()
            .map_err(|err| InMemoryNetworkError(err.to_string()))?;
        update(&mut state);
        Ok(())
    }

    fn route(
        &self,
        endpoint: &AgentEndpoint,
        operation: A2aOperation,
    ) -> AgentClientResult<Route> {
        let unreachable = |reason: String| AgentClientError::Unreachable {
            endpoint: endpoint.clone(),
            operation,
            reason,
        };

        let state = self.state.read().map_err(|err| unreachable(err.to_string()))?;

        if state.unreachable.contains(endpoint) {
            return Err(unreachable("connection refused".to_owned()));
        }

        if let Some(&code) = state.http_errors.get(endpoint) {
            return Err(AgentClientError::Status {
                endpoint: endpoint.clone(),
                operation,
                code,
            });
        }

        let handler = state
            .handlers
            .get(endpoint)
            .cloned()
            .ok_or_else(|| unreachable("no agent mounted at endpoint".to_owned()))?;
        let latency = state.latency.get(endpoint).copied().unwrap_or_default();

        Ok(Route { handler, latency })
    }

    async fn dispatch<T, F, Fut>(
        &self,
        endpoint: &AgentEndpoint,
        operation: A2aOperation,
        deadline: Duration,
        call: F,
    ) -> AgentClientResult<T>
    where
        F: FnOnce(Arc<dyn AgentHandler>) -> Fut + Send,
        Fut: Future<Output = T> + Send,
    {
        let Route { handler, latency } = self.route(endpoint, operation)?;

        let exchange = async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            call(handler).await
        };

        tokio::time::timeout(deadline, exchange)
            .await
            .map_err(|_| AgentClientError::Timeout {
                endpoint: endpoint.clone(),
                operation,
                after: deadline,
            })
    }
}

#[async_trait]
impl AgentClient for InMemoryAgentNetwork {
    async fn health(
        &self,
        endpoint: &AgentEndpoint,
        deadline: Duration,
    ) -> AgentClientResult<HealthResponse> {
        self.dispatch(endpoint, A2aOperation::Health, deadline, |handler| async move {
            handler.health().await
        })
        .await
    }

    async fn capabilities(
        &self,
        endpoint: &AgentEndpoint,
        deadline: Duration,
    ) -> AgentClientResult<CapabilityAdvertisement> {
        self.dispatch(
            endpoint,
            A2aOperation::Capabilities,
            deadline,
            |handler| async move { handler.capabilities().await },
        )
        .await
    }

    async fn execute(
        &self,
        endpoint: &AgentEndpoint,
        request: &ExecuteRequest,
        deadline: Duration,
    ) -> AgentClientResult<ExecuteResponse> {
        let owned = request.clone();
        self.dispatch(endpoint, A2aOperation::Execute, deadline, |handler| async move {
            handler.execute(owned).await
        })
        .await
    }

    async fn send_message(
        &self,
        endpoint: &AgentEndpoint,
        request: &A2aMessageRequest,
        deadline: Duration,
    ) -> AgentClientResult<A2aReply> {
        let owned = request.clone();
        self.dispatch(endpoint, A2aOperation::Message, deadline, |handler| async move {
            handler.receive_message(owned).await
        })
        .await
    }
}
