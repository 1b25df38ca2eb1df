//! Caller-side port for talking to a remote agent.

use crate::a2a::domain::{
    A2aMessageRequest, A2aReply, AgentEndpoint, CAPABILITIES_ROUTE, CapabilityAdvertisement,
    EXECUTE_ROUTE, ExecuteRequest, ExecuteResponse, HEALTH_ROUTE, HealthResponse, MESSAGE_ROUTE,
};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type for A2A client operations.
pub type AgentClientResult<T> = Result<T, AgentClientError>;

/// The four A2A operations, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum A2aOperation {
    /// `GET /health`.
    Health,
    /// `GET /capabilities`.
    Capabilities,
    /// `POST /execute`.
    Execute,
    /// `POST /a2a/message`.
    Message,
}

impl A2aOperation {
    /// Returns the route path for this operation.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::Health => HEALTH_ROUTE,
            Self::Capabilities => CAPABILITIES_ROUTE,
            Self::Execute => EXECUTE_ROUTE,
            Self::Message => MESSAGE_ROUTE,
        }
    }
}

impl fmt::Display for A2aOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.route())
    }
}

/// Client contract for the A2A routes.
///
/// Every call carries its own deadline. Implementations must return
/// [`AgentClientError::Timeout`] rather than block past it.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Probes `GET /health`.
    async fn health(
        &self,
        endpoint: &AgentEndpoint,
        deadline: Duration,
    ) -> AgentClientResult<HealthResponse>;

    /// Fetches `GET /capabilities`.
    async fn capabilities(
        &self,
        endpoint: &AgentEndpoint,
        deadline: Duration,
    ) -> AgentClientResult<CapabilityAdvertisement>;

    /// Invokes `POST /execute`.
    async fn execute(
        &self,
        endpoint: &AgentEndpoint,
        request: &ExecuteRequest,
        deadline: Duration,
    ) -> AgentClientResult<ExecuteResponse>;

    /// Invokes `POST /a2a/message`.
    async fn send_message(
        &self,
        endpoint: &AgentEndpoint,
        request: &A2aMessageRequest,
        deadline: Duration,
    ) -> AgentClientResult<A2aReply>;
}

/// Errors returned by A2A client adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentClientError {
    /// The call did not complete before its deadline.
    #[error("{operation} on {endpoint} timed out after {after:?}")]
    Timeout {
        /// Target endpoint.
        endpoint: AgentEndpoint,
        /// Operation that timed out.
        operation: A2aOperation,
        /// Deadline that elapsed.
        after: Duration,
    },

    /// No connection could be made to the endpoint.
    #[error("{operation} on {endpoint} failed: endpoint unreachable ({reason})")]
    Unreachable {
        /// Target endpoint.
        endpoint: AgentEndpoint,
        /// Operation that failed.
        operation: A2aOperation,
        /// Transport diagnostic.
        reason: String,
    },

    /// The endpoint answered with a non-success HTTP status.
    #[error("{operation} on {endpoint} returned HTTP {code}")]
    Status {
        /// Target endpoint.
        endpoint: AgentEndpoint,
        /// Operation that failed.
        operation: A2aOperation,
        /// HTTP status code.
        code: u16,
    },

    /// The response body did not match the protocol.
    #[error("{operation} on {endpoint} returned an undecodable body: {reason}")]
    Decode {
        /// Target endpoint.
        endpoint: AgentEndpoint,
        /// Operation that failed.
        operation: A2aOperation,
        /// Decoder diagnostic.
        reason: String,
    },
}

impl AgentClientError {
    /// Returns whether the failure was a deadline expiry.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns whether the failure means the response could not be parsed.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
