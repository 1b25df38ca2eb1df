//! Shared world state for sequential handover BDD scenarios.

use std::sync::Arc;

use baton::a2a::{
    adapters::InMemoryAgentNetwork,
    domain::{AgentEndpoint, AgentId},
    ports::AgentHandler,
    services::{AgentProfile, AgentRuntime, CalculatorTool},
};
use baton::execution::domain::HandoverStep;
use baton::inference::adapters::ScriptedInference;
use baton::orchestration::{OrchestrationResult, Orchestrator, OrchestratorConfig};
use baton::registry::adapters::InMemoryAgentCatalog;
use eyre::eyre;
use mockable::DefaultClock;
use rstest::fixture;

/// Classifier output returned for every query in these scenarios.
const CALCULATION_CLASSIFICATION: &str = r#"Classification follows.
{"user_intent": "Calculate a product and explain the working",
 "domain_analysis": {"primary_domain": "mathematics", "technical_level": "beginner",
                     "secondary_domains": ["education"]},
 "orchestration_pattern": "sequential"}"#;

/// Orchestrator wired to in-memory adapters.
pub type TestOrchestrator =
    Orchestrator<InMemoryAgentCatalog, InMemoryAgentNetwork, ScriptedInference, DefaultClock>;

/// Agent hosted on the in-memory network.
pub type TestAgent = AgentRuntime<ScriptedInference, DefaultClock>;

/// Scenario world for sequential handover behaviour tests.
pub struct HandoverWorld {
    /// Network the agents are mounted on.
    pub network: InMemoryAgentNetwork,
    /// The orchestrator under test.
    pub orchestrator: TestOrchestrator,
    /// Query passed to the last orchestration.
    pub query: Option<String>,
    /// Result of the last orchestration.
    pub result: Option<OrchestrationResult>,
}

impl HandoverWorld {
    /// Creates a world with an empty network and registry.
    #[must_use]
    pub fn new() -> Self {
        let network = InMemoryAgentNetwork::new();
        let orchestrator = Orchestrator::new(
            Arc::new(InMemoryAgentCatalog::new()),
            Arc::new(network.clone()),
            Arc::new(ScriptedInference::constant(CALCULATION_CLASSIFICATION)),
            Arc::new(DefaultClock),
            OrchestratorConfig::default(),
        );
        Self {
            network,
            orchestrator,
            query: None,
            result: None,
        }
    }

    /// Returns the last orchestration result.
    pub fn result(&self) -> Result<&OrchestrationResult, eyre::Report> {
        self.result
            .as_ref()
            .ok_or_else(|| eyre!("no query has been orchestrated"))
    }

    /// Returns the recorded step at `index`.
    pub fn step(&self, index: usize) -> Result<&HandoverStep, eyre::Report> {
        self.result()?
            .trace
            .steps()
            .get(index)
            .ok_or_else(|| eyre!("trace has no step {index}"))
    }

    /// Mounts `agent` at the endpoint derived from its identifier.
    pub fn mount(&self, agent: TestAgent) -> Result<(), eyre::Report> {
        let address = endpoint(agent.profile().id().as_str())?;
        self.network
            .mount(address, Arc::new(agent) as Arc<dyn AgentHandler>)
            .map_err(|err| eyre!("mount failed: {err}"))
    }
}

impl Default for HandoverWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> HandoverWorld {
    HandoverWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Returns the endpoint an agent is mounted at.
pub fn endpoint(id: &str) -> Result<AgentEndpoint, eyre::Report> {
    AgentEndpoint::new(format!("http://{id}.test")).map_err(|err| eyre!("bad endpoint: {err}"))
}

/// Builds an agent whose model echoes its prompt, so tool results and
/// handover context stay visible in the answer.
pub fn echo_agent(id: &str, name: &str, capability: &str) -> Result<TestAgent, eyre::Report> {
    let agent_id = AgentId::new(id).map_err(|err| eyre!("bad agent id: {err}"))?;
    let model = ScriptedInference::with_responder(|prompt| Ok(format!("Answer based on:\n{prompt}")));
    Ok(AgentRuntime::new(
        AgentProfile::new(agent_id, name).with_capabilities([capability]),
        Arc::new(model),
        Arc::new(DefaultClock),
    ))
}

/// Builds the math agent with the calculator tool.
pub fn math_agent() -> Result<TestAgent, eyre::Report> {
    Ok(echo_agent("math-agent", "Math Agent", "calculator")?.with_tool(CalculatorTool::new()))
}
