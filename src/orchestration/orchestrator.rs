//! End-to-end query orchestration.

use super::{OrchestrationFailure, OrchestrationResult, OrchestratorConfig};
use crate::a2a::{ports::AgentClient, services::A2aMessenger};
use crate::analysis::{
    domain::{ClassificationOutcome, DefaultReason},
    services::QueryAnalyzer,
};
use crate::execution::{
    domain::{HandoverTrace, RunId},
    services::SequentialHandoverExecutor,
};
use crate::inference::ports::InferencePort;
use crate::planning::services::AgentPlanner;
use crate::registry::{
    ports::AgentCatalog,
    services::{AgentFilter, AgentRegistryService},
};
use mockable::Clock;
use std::sync::Arc;
use tokio::time::Instant;

/// Messenger resolving recipients through the orchestrator's registry.
pub type RegistryMessenger<K, A, C> = A2aMessenger<AgentRegistryService<K, A, C>, A, C>;

/// Coordinates registry, analyzer, planner and executor for one query.
///
/// ```ignore
/// let orchestrator = Orchestrator::new(catalog, client, inference, clock, config);
/// orchestrator.registry().discover(&endpoint).await?;
/// let result = orchestrator.orchestrate("Calculate 15 * 23 and explain the steps").await;
/// assert!(result.success);
/// ```
pub struct Orchestrator<K, A, I, C>
where
    K: AgentCatalog,
    A: AgentClient,
    I: InferencePort,
    C: Clock + Send + Sync,
{
    registry: Arc<AgentRegistryService<K, A, C>>,
    messenger: RegistryMessenger<K, A, C>,
    analyzer: QueryAnalyzer<I>,
    planner: AgentPlanner,
    executor: SequentialHandoverExecutor<A, C>,
}

impl<K, A, I, C> Orchestrator<K, A, I, C>
where
    K: AgentCatalog,
    A: AgentClient,
    I: InferencePort,
    C: Clock + Send + Sync,
{
    /// Assembles an orchestrator over shared infrastructure.
    #[must_use]
    pub fn new(
        catalog: Arc<K>,
        client: Arc<A>,
        inference: Arc<I>,
        clock: Arc<C>,
        config: OrchestratorConfig,
    ) -> Self {
        let registry = Arc::new(AgentRegistryService::new(
            catalog,
            Arc::clone(&client),
            Arc::clone(&clock),
            config.registry,
        ));
        let messenger = A2aMessenger::new(
            Arc::clone(&registry),
            Arc::clone(&client),
            Arc::clone(&clock),
            config.messenger,
        );
        Self {
            registry,
            messenger,
            analyzer: QueryAnalyzer::new(inference).with_config(config.analyzer),
            planner: AgentPlanner::new(config.planner),
            executor: SequentialHandoverExecutor::new(client, clock, config.executor),
        }
    }

    /// Returns the agent registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<AgentRegistryService<K, A, C>> {
        &self.registry
    }

    /// Returns the ad-hoc messenger.
    #[must_use]
    pub const fn messenger(&self) -> &RegistryMessenger<K, A, C> {
        &self.messenger
    }

    /// Answers `query` with the registered agents.
    ///
    /// Never fails: every problem is reported through
    /// [`OrchestrationResult::failure`].
    pub async fn orchestrate(&self, query: &str) -> OrchestrationResult {
        let started = Instant::now();
        let run_id = RunId::new();
        let trimmed = query.trim();
        tracing::info!(run_id = %run_id, "orchestration started");

        if trimmed.is_empty() {
            let classification =
                ClassificationOutcome::defaulted(trimmed, DefaultReason::EmptyQuery);
            let failure = OrchestrationFailure::EmptyQuery;
            return Self::failed(run_id, classification, failure, started);
        }

        let classification = self.analyzer.analyze(trimmed).await;

        let agents = match self.registry.list(&AgentFilter::reachable()).await {
            Ok(agents) => agents,
            Err(err) => {
                return Self::failed(run_id, classification, err.into(), started);
            }
        };

        let plan = match self.planner.plan(classification.classification(), &agents) {
            Ok(plan) => plan,
            Err(err) => {
                return Self::failed(run_id, classification, err.into(), started);
            }
        };

        let outcome = self.executor.execute_run(run_id, &plan, trimmed).await;
        let failure = (!outcome.success).then(|| OrchestrationFailure::AllStepsFailed {
            agents: outcome.trace.attempted_agents(),
            deadline_exceeded: outcome.deadline_exceeded,
        });

        let elapsed = started.elapsed();
        tracing::info!(
            run_id = %run_id,
            success = outcome.success,
            steps = outcome.trace.steps().len(),
            elapsed_ms = elapsed.as_millis(),
            "orchestration finished"
        );

        OrchestrationResult {
            run_id,
            success: outcome.success,
            final_response: outcome.final_response,
            classification,
            plan: Some(plan),
            trace: outcome.trace,
            failure,
            elapsed,
        }
    }

    fn failed(
        run_id: RunId,
        classification: ClassificationOutcome,
        failure: OrchestrationFailure,
        started: Instant,
    ) -> OrchestrationResult {
        tracing::warn!(run_id = %run_id, failure = %failure, "orchestration failed");
        let final_response = match &failure {
            OrchestrationFailure::EmptyQuery => "Please provide a query.".to_owned(),
            OrchestrationFailure::NoCapableAgent(_) => {
                "No registered agent can handle this query.".to_owned()
            }
            OrchestrationFailure::Registry(_) | OrchestrationFailure::AllStepsFailed { .. } => {
                format!("Orchestration failed: {failure}.")
            }
        };

        OrchestrationResult {
            run_id,
            success: false,
            final_response,
            classification,
            plan: None,
            trace: HandoverTrace::new(run_id),
            failure: Some(failure),
            elapsed: started.elapsed(),
        }
    }
}
