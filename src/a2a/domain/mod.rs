//! Domain model for the agent-to-agent protocol.
//!
//! Contains the identity and addressing types every participant shares, the
//! JSON bodies of the four A2A routes, and the ad-hoc message record.

mod error;
mod ids;
mod message;
mod wire;

pub use error::A2aDomainError;
pub use ids::{AgentEndpoint, AgentId, MessageId};
pub use message::{A2aMessage, MessageKind};
pub use wire::{
    A2aMessageRequest, A2aReply, CAPABILITIES_ROUTE, CapabilityAdvertisement, EXECUTE_ROUTE,
    ExecuteRequest, ExecuteResponse, HEALTH_ROUTE, HealthResponse, MESSAGE_ROUTE, ResponseStatus,
};
