//! Baton: capability-driven multi-agent orchestration.
//!
//! Baton coordinates independently running, capability-tagged LLM agents to
//! answer one user query together. A query is classified, the best-suited
//! registered agents are selected and ordered, and they run as a handover
//! chain in which each agent's output feeds the next.
//!
//! # Architecture
//!
//! Each subsystem follows hexagonal architecture:
//!
//! - **Domain**: Validated value types and aggregates with no I/O
//! - **Ports**: Trait contracts for catalogs, agent transport and inference
//! - **Adapters**: In-memory and HTTP implementations of the ports
//! - **Services**: Orchestration of domain logic over the ports
//!
//! # Modules
//!
//! - [`a2a`]: Agent-to-agent protocol, agent runtime and messaging
//! - [`inference`]: Opaque text-generation port and backends
//! - [`registry`]: Agent registration, discovery and health tracking
//! - [`analysis`]: Query classification
//! - [`planning`]: Agent selection and ordering
//! - [`execution`]: Sequential handover execution
//! - [`orchestration`]: End-to-end query orchestration

pub mod a2a;
pub mod analysis;
pub mod execution;
pub mod inference;
pub mod orchestration;
pub mod planning;
pub mod registry;

#[cfg(test)]
mod test_support;
