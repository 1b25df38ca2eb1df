//! Execution plan aggregate.

use crate::a2a::domain::{AgentEndpoint, AgentId};
use crate::analysis::domain::OrchestrationPattern;
use crate::registry::domain::AgentDescriptor;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors raised while building a plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanningError {
    /// No agent cleared the relevance threshold.
    #[error("no registered agent is relevant to the query")]
    EmptyPlan,

    /// The steps violate a plan invariant.
    #[error("invalid execution plan: {0}")]
    InvalidPlan(String),
}

/// How steps hand work to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandoffStrategy {
    /// One step answers alone.
    Direct,
    /// Each step receives the previous step's output.
    #[default]
    Sequential,
    /// Steps are independent.
    Parallel,
}

impl HandoffStrategy {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }
}

impl From<OrchestrationPattern> for HandoffStrategy {
    fn from(pattern: OrchestrationPattern) -> Self {
        match pattern {
            OrchestrationPattern::Direct => Self::Direct,
            OrchestrationPattern::Sequential => Self::Sequential,
            OrchestrationPattern::Parallel => Self::Parallel,
        }
    }
}

impl fmt::Display for HandoffStrategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One agent invocation in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    step_index: usize,
    agent_id: AgentId,
    agent_name: String,
    endpoint: AgentEndpoint,
    rationale: String,
    relevance_score: u32,
}

impl PlanStep {
    /// Creates a step targeting `agent`.
    #[must_use]
    pub fn new(
        step_index: usize,
        agent: &AgentDescriptor,
        relevance_score: u32,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            step_index,
            agent_id: agent.id().clone(),
            agent_name: agent.name().to_owned(),
            endpoint: agent.endpoint().clone(),
            rationale: rationale.into(),
            relevance_score,
        }
    }

    /// Returns the zero-based position in the plan.
    #[must_use]
    pub const fn step_index(&self) -> usize {
        self.step_index
    }

    /// Returns the target agent.
    #[must_use]
    pub const fn agent_id(&self) -> &AgentId {
        &self.agent_id
    }

    /// Returns the target agent's display name.
    #[must_use]
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// Returns the target agent's endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &AgentEndpoint {
        &self.endpoint
    }

    /// Returns why the agent was chosen.
    #[must_use]
    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    /// Returns the relevance score the agent was chosen with.
    #[must_use]
    pub const fn relevance_score(&self) -> u32 {
        self.relevance_score
    }
}

/// Ordered agent invocations for one query.
///
/// Steps are indexed densely from zero, no agent appears twice and a plan
/// always has at least one step. A direct plan has exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionPlan {
    steps: Vec<PlanStep>,
    handoff_strategy: HandoffStrategy,
}

impl ExecutionPlan {
    /// Validates and creates a plan.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::EmptyPlan`] for no steps, and
    /// [`PlanningError::InvalidPlan`] for sparse indices, a repeated agent,
    /// or a direct plan with more than one step.
    pub fn new(
        steps: Vec<PlanStep>,
        handoff_strategy: HandoffStrategy,
    ) -> Result<Self, PlanningError> {
        if steps.is_empty() {
            return Err(PlanningError::EmptyPlan);
        }

        if handoff_strategy == HandoffStrategy::Direct && steps.len() > 1 {
            return Err(PlanningError::InvalidPlan(format!(
                "direct plan has {} steps",
                steps.len()
            )));
        }

        let mut seen = HashSet::with_capacity(steps.len());
        for (expected, step) in steps.iter().enumerate() {
            if step.step_index != expected {
                return Err(PlanningError::InvalidPlan(format!(
                    "step {expected} carries index {}",
                    step.step_index
                )));
            }
            if !seen.insert(&step.agent_id) {
                return Err(PlanningError::InvalidPlan(format!(
                    "agent {} appears more than once",
                    step.agent_id
                )));
            }
        }

        Ok(Self {
            steps,
            handoff_strategy,
        })
    }

    /// Returns the steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; plans have at least one step.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the handoff strategy.
    #[must_use]
    pub const fn handoff_strategy(&self) -> HandoffStrategy {
        self.handoff_strategy
    }

    /// Returns the planned agents in order.
    pub fn agent_ids(&self) -> impl Iterator<Item = &AgentId> {
        self.steps.iter().map(PlanStep::agent_id)
    }
}
