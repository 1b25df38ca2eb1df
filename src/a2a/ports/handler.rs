//! Agent-side port: what an agent process serves on the A2A routes.

use crate::a2a::domain::{
    A2aMessageRequest, A2aReply, CapabilityAdvertisement, ExecuteRequest, ExecuteResponse,
    HealthResponse,
};
use async_trait::async_trait;

/// Protocol handlers an agent process exposes.
///
/// Failures are reported in-band through
/// [`ResponseStatus::Error`](crate::a2a::domain::ResponseStatus::Error), so
/// these methods do not return `Result`.
#[async_trait]
pub trait AgentHandler: Send + Sync {
    /// Answers a liveness probe. Must not perform inference.
    async fn health(&self) -> HealthResponse;

    /// Returns the static capability advertisement.
    async fn capabilities(&self) -> CapabilityAdvertisement;

    /// Processes user-originated input.
    async fn execute(&self, request: ExecuteRequest) -> ExecuteResponse;

    /// Processes a peer-originated message.
    async fn receive_message(&self, request: A2aMessageRequest) -> A2aReply;
}
