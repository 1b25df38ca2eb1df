//! Handover step records.

use crate::a2a::domain::AgentId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Why a step produced no usable output.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum StepError {
    /// The agent did not answer before the step deadline.
    #[error("agent did not respond within {0:?}")]
    Timeout(Duration),

    /// The agent could not be reached or answered with an HTTP error.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The agent answered with `status: error`.
    #[error("agent reported an error: {0}")]
    AgentReported(String),

    /// The agent answered successfully with blank text.
    #[error("agent returned an empty response")]
    EmptyResponse,
}

/// Outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// The agent produced usable output.
    Success,
    /// The agent produced nothing usable.
    Failed,
}

/// One executed plan step.
///
/// Built with [`HandoverStep::started`] and finished with either
/// [`HandoverStep::succeed`] or [`HandoverStep::fail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoverStep {
    step_index: usize,
    agent_id: AgentId,
    input_context: String,
    output_text: String,
    tools_used: Vec<String>,
    execution_time: Duration,
    started_at: DateTime<Utc>,
    status: StepStatus,
    error: Option<StepError>,
}

impl HandoverStep {
    /// Starts a step record. It reads as failed until finished.
    #[must_use]
    pub fn started(
        step_index: usize,
        agent_id: AgentId,
        input_context: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            step_index,
            agent_id,
            input_context: input_context.into(),
            output_text: String::new(),
            tools_used: Vec::new(),
            execution_time: Duration::ZERO,
            started_at,
            status: StepStatus::Failed,
            error: None,
        }
    }

    /// Finishes the step with the agent's output.
    #[must_use]
    pub fn succeed(
        mut self,
        output_text: impl Into<String>,
        tools_used: Vec<String>,
        execution_time: Duration,
    ) -> Self {
        self.output_text = output_text.into();
        self.tools_used = tools_used;
        self.execution_time = execution_time;
        self.status = StepStatus::Success;
        self.error = None;
        self
    }

    /// Finishes the step with a failure.
    #[must_use]
    pub fn fail(mut self, error: StepError, execution_time: Duration) -> Self {
        self.execution_time = execution_time;
        self.status = StepStatus::Failed;
        self.error = Some(error);
        self
    }

    /// Returns the plan position.
    #[must_use]
    pub const fn step_index(&self) -> usize {
        self.step_index
    }

    /// Returns the invoked agent.
    #[must_use]
    pub const fn agent_id(&self) -> &AgentId {
        &self.agent_id
    }

    /// Returns the text sent to the agent.
    #[must_use]
    pub fn input_context(&self) -> &str {
        &self.input_context
    }

    /// Returns the agent's output; empty for failed steps.
    #[must_use]
    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    /// Returns the tools the agent reported using.
    #[must_use]
    pub fn tools_used(&self) -> &[String] {
        &self.tools_used
    }

    /// Returns how long the step took, measured by the executor.
    #[must_use]
    pub const fn execution_time(&self) -> Duration {
        self.execution_time
    }

    /// Returns when the step started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn status(&self) -> StepStatus {
        self.status
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&StepError> {
        self.error.as_ref()
    }

    /// Returns whether the step succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, StepStatus::Success)
    }
}
