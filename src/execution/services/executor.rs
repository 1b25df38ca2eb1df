//! Sequential handover execution.

use super::ExecutorConfig;
use crate::a2a::{domain::ExecuteRequest, ports::AgentClient};
use crate::execution::domain::{
    ExecutionOutcome, HandoverStep, HandoverTrace, RunId, StepError,
};
use crate::planning::domain::{ExecutionPlan, HandoffStrategy, PlanStep};
use minijinja::Environment;
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const HANDOVER_TEMPLATE: &str = "\
Original user query:
{{ query }}

Output from {{ previous_agent }}{% if truncated %} (truncated){% endif %}:
{{ previous_output }}

Continue the task from where {{ previous_agent }} left off. Build on its \
output and contribute your part of the answer to the original query.";

/// Runs plan steps one after another, passing each good output forward.
///
/// A failed step is recorded and skipped; the next step receives the last
/// good output instead. Each step gets `step_timeout`, clamped to what is
/// left of the run budget.
pub struct SequentialHandoverExecutor<A, C>
where
    A: AgentClient,
    C: Clock + Send + Sync,
{
    client: Arc<A>,
    clock: Arc<C>,
    config: ExecutorConfig,
}

impl<A, C> SequentialHandoverExecutor<A, C>
where
    A: AgentClient,
    C: Clock + Send + Sync,
{
    /// Creates an executor.
    #[must_use]
    pub const fn new(client: Arc<A>, clock: Arc<C>, config: ExecutorConfig) -> Self {
        Self {
            client,
            clock,
            config,
        }
    }

    /// Returns the timing and context policy.
    #[must_use]
    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Executes `plan` for `original_query` under a fresh run identifier.
    pub async fn execute(&self, plan: &ExecutionPlan, original_query: &str) -> ExecutionOutcome {
        self.execute_run(RunId::new(), plan, original_query).await
    }

    /// Executes `plan` for `original_query`, recording steps under `run_id`.
    pub async fn execute_run(
        &self,
        run_id: RunId,
        plan: &ExecutionPlan,
        original_query: &str,
    ) -> ExecutionOutcome {
        if plan.handoff_strategy() == HandoffStrategy::Parallel {
            tracing::warn!(
                run_id = %run_id,
                "parallel plan executed with sequential handover"
            );
        }

        let budget = self.config.run_budget(plan.len());
        let run_started = Instant::now();
        let mut trace = HandoverTrace::new(run_id);
        let mut last_good: Option<(&PlanStep, String)> = None;
        let mut deadline_exceeded = false;

        tracing::info!(
            run_id = %run_id,
            steps = plan.len(),
            budget_ms = budget.as_millis(),
            "run started"
        );

        for step in plan.steps() {
            let remaining = budget.saturating_sub(run_started.elapsed());
            if remaining.is_zero() {
                tracing::warn!(
                    run_id = %run_id,
                    step_index = step.step_index(),
                    "run budget exhausted; remaining steps skipped"
                );
                deadline_exceeded = true;
                break;
            }

            let input = match &last_good {
                Some((previous, output)) => {
                    self.handover_message(original_query, previous, output)
                }
                None => original_query.to_owned(),
            };
            let deadline = self.config.step_timeout.min(remaining);
            let record = self.run_step(step, input, deadline).await;

            if record.is_success() {
                last_good = Some((step, record.output_text().to_owned()));
            }
            trace.record(record);
        }

        let success = trace.success_count() > 0;
        let final_response = trace.last_success().map_or_else(
            || failure_summary(&trace),
            |step| step.output_text().to_owned(),
        );

        tracing::info!(
            run_id = %run_id,
            success,
            deadline_exceeded,
            elapsed_ms = run_started.elapsed().as_millis(),
            "run finished"
        );

        ExecutionOutcome {
            final_response,
            trace,
            success,
            deadline_exceeded,
        }
    }

    async fn run_step(&self, step: &PlanStep, input: String, deadline: Duration) -> HandoverStep {
        let request = ExecuteRequest::new(input.as_str());
        let pending = HandoverStep::started(
            step.step_index(),
            step.agent_id().clone(),
            input,
            self.clock.utc(),
        );
        let timer = Instant::now();

        let result = tokio::time::timeout(
            deadline,
            self.client.execute(step.endpoint(), &request, deadline),
        )
        .await;
        let elapsed = timer.elapsed();

        let record = match result {
            Err(_) => pending.fail(StepError::Timeout(deadline), elapsed),
            Ok(Err(err)) if err.is_timeout() => pending.fail(StepError::Timeout(deadline), elapsed),
            Ok(Err(err)) => pending.fail(StepError::Transport(err.to_string()), elapsed),
            Ok(Ok(response)) if !response.status.is_success() => {
                pending.fail(StepError::AgentReported(response.response), elapsed)
            }
            Ok(Ok(response)) if response.response.trim().is_empty() => {
                pending.fail(StepError::EmptyResponse, elapsed)
            }
            Ok(Ok(response)) => pending.succeed(response.response, response.tools_used, elapsed),
        };

        match record.error() {
            None => tracing::info!(
                step_index = record.step_index(),
                agent_id = %record.agent_id(),
                elapsed_ms = elapsed.as_millis(),
                "step succeeded"
            ),
            Some(error) => tracing::warn!(
                step_index = record.step_index(),
                agent_id = %record.agent_id(),
                elapsed_ms = elapsed.as_millis(),
                error = %error,
                "step failed"
            ),
        }
        record
    }

    fn handover_message(&self, query: &str, previous: &PlanStep, output: &str) -> String {
        let limit = self.config.handover_context_chars;
        let truncated = output.chars().count() > limit;
        let carried: String = output.chars().take(limit).collect();
        let context = json!({
            "query": query,
            "previous_agent": previous.agent_name(),
            "previous_output": carried,
            "truncated": truncated,
        });

        Environment::new()
            .render_str(HANDOVER_TEMPLATE, context)
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "handover template failed; sending the query alone");
                query.to_owned()
            })
    }
}

fn failure_summary(trace: &HandoverTrace) -> String {
    let attempted: Vec<String> = trace
        .attempted_agents()
        .iter()
        .map(ToString::to_string)
        .collect();
    if attempted.is_empty() {
        return "No agent produced a response. Attempted agents: none.".to_owned();
    }
    format!(
        "No agent produced a response. Attempted agents: {}.",
        attempted.join(", ")
    )
}
