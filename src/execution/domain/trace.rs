//! Append-only execution trace and run outcome.

use super::{HandoverStep, RunId};
use crate::a2a::domain::AgentId;
use serde::Serialize;

/// Ordered record of every step attempted in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoverTrace {
    run_id: RunId,
    steps: Vec<HandoverStep>,
}

impl HandoverTrace {
    /// Creates an empty trace.
    #[must_use]
    pub const fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            steps: Vec::new(),
        }
    }

    /// Appends a finished step.
    pub fn record(&mut self, step: HandoverStep) {
        self.steps.push(step);
    }

    /// Returns the run identifier.
    #[must_use]
    pub const fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns the steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[HandoverStep] {
        &self.steps
    }

    /// Returns the most recent successful step.
    #[must_use]
    pub fn last_success(&self) -> Option<&HandoverStep> {
        self.steps.iter().rev().find(|step| step.is_success())
    }

    /// Returns the number of successful steps.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_success()).count()
    }

    /// Returns every attempted agent in order.
    #[must_use]
    pub fn attempted_agents(&self) -> Vec<AgentId> {
        self.steps
            .iter()
            .map(|step| step.agent_id().clone())
            .collect()
    }
}

/// Result of executing a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionOutcome {
    /// Output of the last successful step, or a failure summary.
    pub final_response: String,
    /// Every attempted step.
    pub trace: HandoverTrace,
    /// Whether at least one step succeeded.
    pub success: bool,
    /// Whether the run budget ran out before every step was attempted.
    pub deadline_exceeded: bool,
}
