//! Given steps for agent registration BDD scenarios.

use std::sync::Arc;

use super::world::{RegistrationWorld, agent_id, discover_all, endpoint, sweep};
use baton::a2a::{
    ports::AgentHandler,
    services::{AgentProfile, AgentRuntime},
};
use baton::inference::adapters::ScriptedInference;
use eyre::eyre;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"a {role} agent advertising "{capability}" is running"#)]
fn agent_is_running(
    world: &mut RegistrationWorld,
    role: String,
    capability: String,
) -> Result<(), eyre::Report> {
    let id = format!("{role}-agent");
    let agent = AgentRuntime::new(
        AgentProfile::new(agent_id(&id)?, format!("{role} agent"))
            .with_capabilities([capability.as_str()]),
        Arc::new(ScriptedInference::new()),
        Arc::new(DefaultClock),
    );
    world
        .network
        .mount(endpoint(&id)?, Arc::new(agent) as Arc<dyn AgentHandler>)
        .map_err(|err| eyre!("mount failed: {err}"))?;
    world.advertised.insert(id, capability);
    Ok(())
}

#[given(r#"the agents "{first}" and "{second}" have been discovered"#)]
fn agents_have_been_discovered(
    world: &mut RegistrationWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    discover_all(world, &[first.as_str(), second.as_str()])
}

#[given(r#"the "{agent}" endpoint stops responding"#)]
fn endpoint_stops_responding(
    world: &mut RegistrationWorld,
    agent: String,
) -> Result<(), eyre::Report> {
    world
        .network
        .set_unreachable(&endpoint(&agent)?, true)
        .map_err(|err| eyre!("fault injection failed: {err}"))
}

#[given("{count:usize} health sweeps have run")]
fn health_sweeps_have_run(world: &mut RegistrationWorld, count: usize) -> Result<(), eyre::Report> {
    sweep(world, count)
}
