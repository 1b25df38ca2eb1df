//! Orchestration run result.

use crate::a2a::domain::AgentId;
use crate::analysis::domain::ClassificationOutcome;
use crate::execution::domain::{HandoverTrace, RunId};
use crate::planning::domain::{ExecutionPlan, PlanningError};
use crate::registry::services::RegistryError;
use std::time::Duration;
use thiserror::Error;

/// Why a run produced no agent answer.
#[derive(Debug, Clone, Error)]
pub enum OrchestrationFailure {
    /// The query was blank.
    #[error("query is empty")]
    EmptyQuery,

    /// The registry could not be read.
    #[error("agent registry is unavailable: {0}")]
    Registry(#[from] RegistryError),

    /// No registered agent is relevant to the query.
    #[error("no capable agent: {0}")]
    NoCapableAgent(#[from] PlanningError),

    /// Every attempted step failed.
    #[error("all {} attempted agents failed", .agents.len())]
    AllStepsFailed {
        /// Agents attempted, in order.
        agents: Vec<AgentId>,
        /// Whether the run budget cut the plan short.
        deadline_exceeded: bool,
    },
}

/// Outcome of one orchestration run.
///
/// Always returned, whatever failed along the way.
#[derive(Debug, Clone)]
pub struct OrchestrationResult {
    /// Run identifier, shared with the trace.
    pub run_id: RunId,
    /// Whether an agent produced the final response.
    pub success: bool,
    /// Final agent output, or a human-readable failure summary.
    pub final_response: String,
    /// How the query was classified.
    pub classification: ClassificationOutcome,
    /// The plan executed, when one could be built.
    pub plan: Option<ExecutionPlan>,
    /// Every attempted step; empty when no plan was executed.
    pub trace: HandoverTrace,
    /// Why the run failed, if it did.
    pub failure: Option<OrchestrationFailure>,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}
