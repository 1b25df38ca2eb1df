//! Shared world state for agent registration BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use baton::a2a::{
    adapters::InMemoryAgentNetwork,
    domain::{AgentEndpoint, AgentId},
};
use baton::registry::{
    adapters::InMemoryAgentCatalog,
    domain::{AgentDescriptor, Capability},
    services::{AgentFilter, AgentRegistryService, RegistryConfig, RegistryResult},
};
use eyre::eyre;
use mockable::DefaultClock;
use rstest::fixture;

/// Registry service type used by the BDD world.
pub type TestRegistryService =
    AgentRegistryService<InMemoryAgentCatalog, InMemoryAgentNetwork, DefaultClock>;

/// Scenario world for agent registration behaviour tests.
pub struct RegistrationWorld {
    /// Network the agents are mounted on.
    pub network: InMemoryAgentNetwork,
    /// The registry service under test.
    pub service: TestRegistryService,
    /// Capability advertised by each running agent, keyed by identifier.
    pub advertised: HashMap<String, String>,
    /// Stored descriptor after each direct registration.
    pub registrations: Vec<AgentDescriptor>,
    /// Catalog version after each direct registration.
    pub versions: Vec<u64>,
    /// Result of the last discovery attempt.
    pub last_discovery: Option<RegistryResult<AgentDescriptor>>,
}

impl RegistrationWorld {
    /// Creates a world with an empty network and registry.
    #[must_use]
    pub fn new() -> Self {
        let network = InMemoryAgentNetwork::new();
        let service = AgentRegistryService::new(
            Arc::new(InMemoryAgentCatalog::new()),
            Arc::new(network.clone()),
            Arc::new(DefaultClock),
            RegistryConfig::default(),
        );
        Self {
            network,
            service,
            advertised: HashMap::new(),
            registrations: Vec::new(),
            versions: Vec::new(),
            last_discovery: None,
        }
    }

    /// Builds a fresh descriptor for a running agent.
    pub fn descriptor(&self, id: &str) -> Result<AgentDescriptor, eyre::Report> {
        let capability = self
            .advertised
            .get(id)
            .ok_or_else(|| eyre!("agent '{id}' is not running"))?;
        let capabilities =
            Capability::set_from([capability]).map_err(|err| eyre!("bad capability: {err}"))?;
        AgentDescriptor::new(agent_id(id)?, id, endpoint(id)?, capabilities, &DefaultClock)
            .map_err(|err| eyre!("bad descriptor: {err}"))
    }

    /// Lists agents that are not unreachable.
    pub fn reachable(&self) -> Result<Vec<AgentDescriptor>, eyre::Report> {
        run_async(self.service.list(&AgentFilter::reachable()))
            .map_err(|err| eyre!("listing failed: {err}"))
    }
}

impl Default for RegistrationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RegistrationWorld {
    RegistrationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses an agent identifier.
pub fn agent_id(value: &str) -> Result<AgentId, eyre::Report> {
    AgentId::new(value).map_err(|err| eyre!("bad agent id: {err}"))
}

/// Returns the endpoint an agent is mounted at.
pub fn endpoint(id: &str) -> Result<AgentEndpoint, eyre::Report> {
    AgentEndpoint::new(format!("http://{id}.test")).map_err(|err| eyre!("bad endpoint: {err}"))
}

/// Discovers every listed agent.
pub fn discover_all(world: &RegistrationWorld, ids: &[&str]) -> Result<(), eyre::Report> {
    for id in ids {
        run_async(world.service.discover(&endpoint(id)?))
            .map_err(|err| eyre!("discovery of {id} failed: {err}"))?;
    }
    Ok(())
}

/// Runs `count` health sweeps over every registered agent.
pub fn sweep(world: &RegistrationWorld, count: usize) -> Result<(), eyre::Report> {
    for _ in 0..count {
        run_async(world.service.health_check_all())
            .map_err(|err| eyre!("health sweep failed: {err}"))?;
    }
    Ok(())
}
