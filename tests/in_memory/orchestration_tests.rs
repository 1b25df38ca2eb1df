//! In-memory integration tests for end-to-end orchestration.

use super::helpers::{
    CALCULATION_CLASSIFICATION, CALCULATION_QUERY, agent_id, discover, endpoint, math_agent,
    mount, network, orchestrator, writer_agent,
};
use baton::a2a::{adapters::InMemoryAgentNetwork, domain::AgentId};
use baton::execution::services::ExecutorConfig;
use baton::inference::adapters::ScriptedInference;
use baton::orchestration::{OrchestrationFailure, OrchestratorConfig};
use baton::planning::domain::HandoffStrategy;
use rstest::rstest;
use std::time::Duration;

const DIRECT_CLASSIFICATION: &str = r#"{"user_intent": "Multiply two numbers",
 "domain_analysis": {"primary_domain": "arithmetic", "technical_level": "beginner",
                     "secondary_domains": []},
 "orchestration_pattern": "direct"}"#;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn direct_pattern_uses_only_the_best_agent(network: InMemoryAgentNetwork) {
    mount(&network, math_agent());
    mount(&network, writer_agent());
    let inference = ScriptedInference::new().reply(DIRECT_CLASSIFICATION);
    let baton = orchestrator(&network, &inference, OrchestratorConfig::default());
    discover(&baton, &["math-agent", "writer-agent"]).await;

    let result = baton.orchestrate("What is 12 x 12?").await;

    assert!(result.success);
    let plan = result.plan.as_ref().expect("plan was built");
    assert_eq!(plan.handoff_strategy(), HandoffStrategy::Direct);
    assert_eq!(plan.len(), 1);
    let chosen: Vec<&str> = plan.agent_ids().map(AgentId::as_str).collect();
    assert_eq!(chosen, vec!["math-agent"]);
    assert!(result.final_response.contains("12 * 12 = 144"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_agents_are_never_planned(network: InMemoryAgentNetwork) {
    mount(&network, math_agent());
    mount(&network, writer_agent());
    let inference = ScriptedInference::new().reply(CALCULATION_CLASSIFICATION);
    let baton = orchestrator(&network, &inference, OrchestratorConfig::default());
    discover(&baton, &["math-agent", "writer-agent"]).await;
    network
        .set_unreachable(&endpoint("math-agent"), true)
        .expect("inject fault");
    for _ in 0..3 {
        baton
            .registry()
            .health_check(&agent_id("math-agent"))
            .await
            .expect("probe should run");
    }

    let result = baton.orchestrate(CALCULATION_QUERY).await;

    let plan = result.plan.as_ref().expect("plan was built");
    let planned: Vec<&str> = plan.agent_ids().map(AgentId::as_str).collect();
    assert_eq!(planned, vec!["writer-agent"]);
    assert!(result.success);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn run_budget_cuts_a_slow_chain_short(network: InMemoryAgentNetwork) {
    mount(&network, math_agent());
    mount(&network, writer_agent());
    let inference = ScriptedInference::new().reply(CALCULATION_CLASSIFICATION);
    let executor = ExecutorConfig::default()
        .with_step_timeout(Duration::from_secs(60))
        .with_run_deadline(Duration::from_secs(60));
    let baton = orchestrator(
        &network,
        &inference,
        OrchestratorConfig::default().with_executor(executor),
    );
    discover(&baton, &["math-agent", "writer-agent"]).await;
    network
        .set_latency(&endpoint("math-agent"), Duration::from_secs(600))
        .expect("inject latency");

    let result = baton.orchestrate(CALCULATION_QUERY).await;

    assert!(!result.success);
    match result.failure {
        Some(OrchestrationFailure::AllStepsFailed {
            agents,
            deadline_exceeded,
        }) => {
            assert_eq!(agents, vec![agent_id("math-agent")]);
            assert!(deadline_exceeded);
        }
        other => panic!("expected AllStepsFailed, got {other:?}"),
    }
    assert_eq!(result.trace.steps().len(), 1);
}
