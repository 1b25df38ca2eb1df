//! In-memory integration tests for handover step deadlines.

use super::helpers::{CALCULATION_QUERY, endpoint, math_agent, mount, network, writer_agent};
use baton::a2a::adapters::InMemoryAgentNetwork;
use baton::analysis::domain::{
    DomainAnalysis, OrchestrationPattern, QueryClassification, TechnicalLevel,
};
use baton::execution::{
    domain::StepError,
    services::{ExecutorConfig, SequentialHandoverExecutor},
};
use baton::planning::{domain::ExecutionPlan, services::AgentPlanner};
use baton::registry::{
    adapters::InMemoryAgentCatalog,
    services::{AgentFilter, AgentRegistryService, RegistryConfig},
};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

type TestExecutor = SequentialHandoverExecutor<InMemoryAgentNetwork, DefaultClock>;

fn calculation() -> QueryClassification {
    QueryClassification::new(
        "Calculate a product and explain the working",
        DomainAnalysis::new("mathematics", TechnicalLevel::Beginner, ["education"]),
        OrchestrationPattern::Sequential,
    )
}

/// Discovers the math and writer agents and plans the calculation query.
async fn calculation_plan(network: &InMemoryAgentNetwork) -> ExecutionPlan {
    let registry = AgentRegistryService::new(
        Arc::new(InMemoryAgentCatalog::new()),
        Arc::new(network.clone()),
        Arc::new(DefaultClock),
        RegistryConfig::default(),
    );
    for id in ["math-agent", "writer-agent"] {
        registry
            .discover(&endpoint(id))
            .await
            .expect("discovery should succeed");
    }
    let agents = registry
        .list(&AgentFilter::reachable())
        .await
        .expect("listing should succeed");

    AgentPlanner::default()
        .plan(&calculation(), &agents)
        .expect("plan should be built")
}

fn executor(network: &InMemoryAgentNetwork, config: ExecutorConfig) -> TestExecutor {
    SequentialHandoverExecutor::new(Arc::new(network.clone()), Arc::new(DefaultClock), config)
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn slow_agent_times_out_and_the_chain_continues(network: InMemoryAgentNetwork) {
    mount(&network, math_agent());
    mount(&network, writer_agent());
    let plan = calculation_plan(&network).await;
    network
        .set_latency(&endpoint("math-agent"), Duration::from_secs(300))
        .expect("inject latency");
    let config = ExecutorConfig::default().with_step_timeout(Duration::from_secs(10));

    let outcome = executor(&network, config)
        .execute(&plan, CALCULATION_QUERY)
        .await;

    let math = outcome.trace.steps().first().expect("math step");
    assert_eq!(
        math.error(),
        Some(&StepError::Timeout(Duration::from_secs(10)))
    );
    assert!(outcome.success);
    assert_eq!(outcome.trace.success_count(), 1);
}
