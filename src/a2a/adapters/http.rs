//! HTTP implementation of the A2A client port.

use crate::a2a::{
    domain::{
        A2aMessageRequest, A2aReply, AgentEndpoint, CapabilityAdvertisement, ExecuteRequest,
        ExecuteResponse, HealthResponse,
    },
    ports::{A2aOperation, AgentClient, AgentClientError, AgentClientResult},
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// `reqwest`-backed A2A client.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpAgentClient {
    client: Client,
}

impl HttpAgentClient {
    /// Creates a client with a fresh connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client that reuses an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &AgentEndpoint,
        operation: A2aOperation,
        deadline: Duration,
    ) -> AgentClientResult<T> {
        tracing::debug!(%endpoint, %operation, ?deadline, "sending A2A request");

        let response = request
            .timeout(deadline)
            .send()
            .await
            .map_err(|err| transport_error(&err, endpoint, operation, deadline))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentClientError::Status {
                endpoint: endpoint.clone(),
                operation,
                code: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| transport_error(&err, endpoint, operation, deadline))?;

        serde_json::from_slice(&body).map_err(|err| AgentClientError::Decode {
            endpoint: endpoint.clone(),
            operation,
            reason: err.to_string(),
        })
    }
}

fn transport_error(
    err: &reqwest::Error,
    endpoint: &AgentEndpoint,
    operation: A2aOperation,
    deadline: Duration,
) -> AgentClientError {
    if err.is_timeout() {
        return AgentClientError::Timeout {
            endpoint: endpoint.clone(),
            operation,
            after: deadline,
        };
    }

    AgentClientError::Unreachable {
        endpoint: endpoint.clone(),
        operation,
        reason: err.to_string(),
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn health(
        &self,
        endpoint: &AgentEndpoint,
        deadline: Duration,
    ) -> AgentClientResult<HealthResponse> {
        let operation = A2aOperation::Health;
        let request = self.client.get(endpoint.route(operation.route()));
        self.send(request, endpoint, operation, deadline).await
    }

    async fn capabilities(
        &self,
        endpoint: &AgentEndpoint,
        deadline: Duration,
    ) -> AgentClientResult<CapabilityAdvertisement> {
        let operation = A2aOperation::Capabilities;
        let request = self.client.get(endpoint.route(operation.route()));
        self.send(request, endpoint, operation, deadline).await
    }

    async fn execute(
        &self,
        endpoint: &AgentEndpoint,
        request: &ExecuteRequest,
        deadline: Duration,
    ) -> AgentClientResult<ExecuteResponse> {
        let operation = A2aOperation::Execute;
        let builder = self
            .client
            .post(endpoint.route(operation.route()))
            .json(request);
        self.send(builder, endpoint, operation, deadline).await
    }

    async fn send_message(
        &self,
        endpoint: &AgentEndpoint,
        request: &A2aMessageRequest,
        deadline: Duration,
    ) -> AgentClientResult<A2aReply> {
        let operation = A2aOperation::Message;
        let builder = self
            .client
            .post(endpoint.route(operation.route()))
            .json(request);
        self.send(builder, endpoint, operation, deadline).await
    }
}
