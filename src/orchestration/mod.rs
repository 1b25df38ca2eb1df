//! End-to-end orchestration.
//!
//! [`Orchestrator::orchestrate`] classifies a query, plans over the
//! reachable registered agents, and runs the plan as a sequential handover
//! chain. It always returns an [`OrchestrationResult`].

mod config;
mod orchestrator;
mod result;

pub use config::OrchestratorConfig;
pub use orchestrator::{Orchestrator, RegistryMessenger};
pub use result::{OrchestrationFailure, OrchestrationResult};
