//! Domain model for the agent registry.
//!
//! Agents are identified by [`AgentId`](crate::a2a::domain::AgentId),
//! tagged with normalised [`Capability`] values and tracked through an
//! [`AgentStatus`] driven by health probes.

mod capability;
mod descriptor;
mod error;
mod status;

pub use capability::Capability;
pub use descriptor::AgentDescriptor;
pub use error::{ParseAgentStatusError, RegistryDomainError};
pub use status::AgentStatus;
