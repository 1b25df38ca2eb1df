//! When steps for agent registration BDD scenarios.

use super::world::{RegistrationWorld, agent_id, discover_all, endpoint, run_async, sweep};
use eyre::eyre;
use rstest_bdd_macros::when;

#[when(r#"the agents "{first}" and "{second}" are discovered"#)]
fn agents_are_discovered(
    world: &mut RegistrationWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    discover_all(world, &[first.as_str(), second.as_str()])
}

#[when(r#"the "{agent}" descriptor is registered twice"#)]
fn descriptor_registered_twice(
    world: &mut RegistrationWorld,
    agent: String,
) -> Result<(), eyre::Report> {
    for _ in 0..2 {
        let descriptor = world.descriptor(&agent)?;
        let id = run_async(world.service.register(descriptor))
            .map_err(|err| eyre!("registration failed: {err}"))?;
        let stored = run_async(world.service.find(&id))
            .map_err(|err| eyre!("lookup failed: {err}"))?
            .ok_or_else(|| eyre!("'{id}' missing after registration"))?;
        let version = run_async(world.service.snapshot_version())
            .map_err(|err| eyre!("version read failed: {err}"))?;
        world.registrations.push(stored);
        world.versions.push(version);
    }
    Ok(())
}

#[when(r#"the endpoint of "{agent}" is discovered"#)]
fn endpoint_is_discovered(world: &mut RegistrationWorld, agent: String) -> Result<(), eyre::Report> {
    let address = endpoint(&agent)?;
    world.last_discovery = Some(run_async(world.service.discover(&address)));
    Ok(())
}

#[when("{count:usize} health sweeps run")]
fn health_sweeps_run(world: &mut RegistrationWorld, count: usize) -> Result<(), eyre::Report> {
    sweep(world, count)
}

#[when(r#"the "{agent}" endpoint recovers and is probed"#)]
fn endpoint_recovers(world: &mut RegistrationWorld, agent: String) -> Result<(), eyre::Report> {
    world
        .network
        .set_unreachable(&endpoint(&agent)?, false)
        .map_err(|err| eyre!("fault removal failed: {err}"))?;
    let id = agent_id(&agent)?;
    run_async(world.service.health_check(&id))
        .map_err(|err| eyre!("probe failed: {err}"))?;
    Ok(())
}
