//! Agent registry.
//!
//! Tracks which agents exist, what they can do and whether they are
//! reachable. Descriptors live in an [`ports::AgentCatalog`]; the
//! [`services::AgentRegistryService`] registers and discovers agents and
//! keeps their status current through health probes.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
