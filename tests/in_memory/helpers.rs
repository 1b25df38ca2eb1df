//! Shared test helpers for in-memory integration tests.

use baton::a2a::{
    adapters::InMemoryAgentNetwork,
    domain::{AgentEndpoint, AgentId},
    ports::AgentHandler,
    services::{AgentProfile, AgentRuntime, CalculatorTool},
};
use baton::inference::adapters::ScriptedInference;
use baton::orchestration::{Orchestrator, OrchestratorConfig};
use baton::registry::adapters::InMemoryAgentCatalog;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Query used by the end-to-end scenarios.
pub const CALCULATION_QUERY: &str = "Calculate 15 * 23 and explain the steps";

/// Classifier output for [`CALCULATION_QUERY`].
pub const CALCULATION_CLASSIFICATION: &str = r#"Here is the classification:
{"user_intent": "Calculate a product and explain the working",
 "domain_analysis": {"primary_domain": "mathematics", "technical_level": "beginner",
                     "secondary_domains": ["education"]},
 "orchestration_pattern": "sequential"}"#;

/// Agent hosted on the in-memory network.
pub type TestAgent = AgentRuntime<ScriptedInference, DefaultClock>;

/// Orchestrator wired to in-memory adapters.
pub type TestOrchestrator =
    Orchestrator<InMemoryAgentCatalog, InMemoryAgentNetwork, ScriptedInference, DefaultClock>;

/// Provides a fresh agent network for each test.
#[fixture]
pub fn network() -> InMemoryAgentNetwork {
    InMemoryAgentNetwork::new()
}

/// Returns the endpoint an agent is mounted at.
///
/// # Panics
///
/// Panics if the derived URL is rejected.
#[must_use]
pub fn endpoint(id: &str) -> AgentEndpoint {
    AgentEndpoint::new(format!("http://{id}.test")).expect("valid endpoint")
}

/// Parses an agent identifier.
///
/// # Panics
///
/// Panics if the identifier is invalid.
#[must_use]
pub fn agent_id(value: &str) -> AgentId {
    AgentId::new(value).expect("valid agent id")
}

/// Model that echoes its prompt, keeping tool results and handover context
/// visible in the agent's answer.
#[must_use]
pub fn echo_model() -> Arc<ScriptedInference> {
    Arc::new(ScriptedInference::with_responder(|prompt| {
        Ok(format!("Answer based on:\n{prompt}"))
    }))
}

/// Builds a math agent with the calculator tool.
#[must_use]
pub fn math_agent() -> TestAgent {
    AgentRuntime::new(
        AgentProfile::new(agent_id("math-agent"), "Math Agent")
            .with_description("Performs arithmetic")
            .with_capabilities(["calculator"]),
        echo_model(),
        Arc::new(DefaultClock),
    )
    .with_tool(CalculatorTool::new())
}

/// Builds a writer agent that explains prior results.
#[must_use]
pub fn writer_agent() -> TestAgent {
    AgentRuntime::new(
        AgentProfile::new(agent_id("writer-agent"), "Writer Agent")
            .with_description("Explains results in plain language")
            .with_capabilities(["summarize"]),
        echo_model(),
        Arc::new(DefaultClock),
    )
}

/// Mounts an agent at the endpoint derived from its identifier.
///
/// # Panics
///
/// Panics if the network state is poisoned.
pub fn mount(network: &InMemoryAgentNetwork, agent: TestAgent) -> Arc<TestAgent> {
    let id = agent.profile().id().to_string();
    let hosted = Arc::new(agent);
    network
        .mount(endpoint(&id), Arc::clone(&hosted) as Arc<dyn AgentHandler>)
        .expect("mount agent");
    hosted
}

/// Builds an orchestrator over `network` classifying with `inference`.
#[must_use]
pub fn orchestrator(
    network: &InMemoryAgentNetwork,
    inference: &ScriptedInference,
    config: OrchestratorConfig,
) -> TestOrchestrator {
    Orchestrator::new(
        Arc::new(InMemoryAgentCatalog::new()),
        Arc::new(network.clone()),
        Arc::new(inference.clone()),
        Arc::new(DefaultClock),
        config,
    )
}

/// Discovers every listed agent through the orchestrator's registry.
///
/// # Panics
///
/// Panics if any discovery fails.
pub async fn discover(orchestrator: &TestOrchestrator, ids: &[&str]) {
    for id in ids {
        orchestrator
            .registry()
            .discover(&endpoint(id))
            .await
            .expect("discovery should succeed");
    }
}
