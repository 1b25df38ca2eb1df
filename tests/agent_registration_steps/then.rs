//! Then steps for agent registration BDD scenarios.

use super::world::{RegistrationWorld, agent_id, run_async};
use baton::registry::{
    domain::{AgentStatus, Capability},
    services::{AgentFilter, RegistryError},
};
use eyre::eyre;
use rstest_bdd_macros::then;

#[then("the number of reachable agents is {count:usize}")]
fn reachable_count(world: &RegistrationWorld, count: usize) -> Result<(), eyre::Report> {
    let reachable = world.reachable()?;
    if reachable.len() != count {
        return Err(eyre!(
            "expected {count} reachable agents, found {}",
            reachable.len()
        ));
    }
    Ok(())
}

#[then(r#"filtering by "{capability}" lists only "{agent}""#)]
fn filter_lists_only(
    world: &RegistrationWorld,
    capability: String,
    agent: String,
) -> Result<(), eyre::Report> {
    let tag = Capability::new(&capability).map_err(|err| eyre!("bad capability: {err}"))?;
    let listed = run_async(
        world
            .service
            .list(&AgentFilter::reachable().with_capability(tag)),
    )
    .map_err(|err| eyre!("listing failed: {err}"))?;
    let ids: Vec<&str> = listed.iter().map(|descriptor| descriptor.id().as_str()).collect();
    if ids != [agent.as_str()] {
        return Err(eyre!("expected only {agent}, got {ids:?}"));
    }
    Ok(())
}

#[then("the original registration time is kept")]
fn registration_time_kept(world: &RegistrationWorld) -> Result<(), eyre::Report> {
    let [first, second] = world.registrations.as_slice() else {
        return Err(eyre!("expected two registrations"));
    };
    if first.registered_at() != second.registered_at() {
        return Err(eyre!(
            "registration time moved from {} to {}",
            first.registered_at(),
            second.registered_at()
        ));
    }
    Ok(())
}

#[then("the second registration leaves the catalog version unchanged")]
fn catalog_version_unchanged(world: &RegistrationWorld) -> Result<(), eyre::Report> {
    let [first, second] = world.versions.as_slice() else {
        return Err(eyre!("expected two catalog versions"));
    };
    if first != second {
        return Err(eyre!("catalog version moved from {first} to {second}"));
    }
    Ok(())
}

#[then("discovery fails because the endpoint is unreachable")]
fn discovery_unreachable(world: &RegistrationWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_discovery
        .as_ref()
        .ok_or_else(|| eyre!("no discovery was attempted"))?;
    if !matches!(result, Err(RegistryError::UnreachableEndpoint { .. })) {
        return Err(eyre!("expected an unreachable endpoint error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the agent "{agent}" is reported "{status}""#)]
fn agent_is_reported(
    world: &RegistrationWorld,
    agent: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected =
        AgentStatus::try_from(status.as_str()).map_err(|err| eyre!("bad status: {err}"))?;
    let found = run_async(world.service.find(&agent_id(&agent)?))
        .map_err(|err| eyre!("lookup failed: {err}"))?
        .ok_or_else(|| eyre!("'{agent}' is not registered"))?;
    if found.status() != expected {
        return Err(eyre!("expected {expected}, found {}", found.status()));
    }
    Ok(())
}
