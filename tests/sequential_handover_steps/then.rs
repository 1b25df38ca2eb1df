//! Then steps for sequential handover BDD scenarios.

use super::world::HandoverWorld;
use baton::a2a::domain::AgentId;
use baton::execution::domain::{StepError, StepStatus};
use eyre::eyre;
use rstest_bdd_macros::then;

#[then("the run succeeds")]
fn run_succeeds(world: &HandoverWorld) -> Result<(), eyre::Report> {
    let result = world.result()?;
    if !result.success {
        return Err(eyre!("expected success, got {:?}", result.failure));
    }
    Ok(())
}

#[then("the run fails")]
fn run_fails(world: &HandoverWorld) -> Result<(), eyre::Report> {
    if world.result()?.success {
        return Err(eyre!("expected the run to fail"));
    }
    Ok(())
}

#[then(r#"the plan is "{first}" then "{second}""#)]
fn plan_is(world: &HandoverWorld, first: String, second: String) -> Result<(), eyre::Report> {
    let plan = world
        .result()?
        .plan
        .as_ref()
        .ok_or_else(|| eyre!("no plan was built"))?;
    let planned: Vec<&str> = plan.agent_ids().map(AgentId::as_str).collect();
    if planned != [first.as_str(), second.as_str()] {
        return Err(eyre!("expected plan [{first}, {second}], got {planned:?}"));
    }
    Ok(())
}

#[then(r#"step {index:usize} output contains "{text}""#)]
fn step_output_contains(
    world: &HandoverWorld,
    index: usize,
    text: String,
) -> Result<(), eyre::Report> {
    let step = world.step(index)?;
    if !step.output_text().contains(&text) {
        return Err(eyre!(
            "step {index} output lacks '{text}': {}",
            step.output_text()
        ));
    }
    Ok(())
}

#[then("step {index:usize} input carries the output of step {previous:usize}")]
fn step_input_carries_previous(
    world: &HandoverWorld,
    index: usize,
    previous: usize,
) -> Result<(), eyre::Report> {
    let earlier = world.step(previous)?;
    let step = world.step(index)?;
    let query = world
        .query
        .as_deref()
        .ok_or_else(|| eyre!("no query recorded"))?;
    let input = step.input_context();

    if !input.contains(query) {
        return Err(eyre!("step {index} input lacks the original query"));
    }
    if !input.contains(earlier.output_text()) {
        return Err(eyre!("step {index} input lacks the output of step {previous}"));
    }
    Ok(())
}

#[then("step {index:usize} failed with a transport error")]
fn step_failed_with_transport(world: &HandoverWorld, index: usize) -> Result<(), eyre::Report> {
    let step = world.step(index)?;
    if step.status() != StepStatus::Failed {
        return Err(eyre!("step {index} did not fail"));
    }
    if !matches!(step.error(), Some(StepError::Transport(_))) {
        return Err(eyre!(
            "expected a transport error, got {:?}",
            step.error()
        ));
    }
    Ok(())
}

#[then("step {index:usize} received the original query verbatim")]
fn step_received_query(world: &HandoverWorld, index: usize) -> Result<(), eyre::Report> {
    let step = world.step(index)?;
    let query = world
        .query
        .as_deref()
        .ok_or_else(|| eyre!("no query recorded"))?;
    if step.input_context() != query {
        return Err(eyre!(
            "expected the bare query, got: {}",
            step.input_context()
        ));
    }
    if !step.is_success() {
        return Err(eyre!("step {index} should have succeeded"));
    }
    Ok(())
}

#[then(r#"the final response is the output of "{agent}""#)]
fn final_response_from(world: &HandoverWorld, agent: String) -> Result<(), eyre::Report> {
    let result = world.result()?;
    let last = result
        .trace
        .last_success()
        .ok_or_else(|| eyre!("no step succeeded"))?;
    if last.agent_id().as_str() != agent {
        return Err(eyre!("last success came from {}", last.agent_id()));
    }
    if result.final_response != last.output_text() {
        return Err(eyre!("final response differs from {agent}'s output"));
    }
    Ok(())
}

#[then(r#"the final response contains "{text}""#)]
fn final_response_contains(world: &HandoverWorld, text: String) -> Result<(), eyre::Report> {
    let response = &world.result()?.final_response;
    if !response.contains(&text) {
        return Err(eyre!("final response lacks '{text}': {response}"));
    }
    Ok(())
}

#[then("the trace holds {count:usize} failed steps")]
fn trace_holds_failed_steps(world: &HandoverWorld, count: usize) -> Result<(), eyre::Report> {
    let steps = world.result()?.trace.steps();
    let failed = steps
        .iter()
        .filter(|step| step.status() == StepStatus::Failed)
        .count();
    if steps.len() != count || failed != count {
        return Err(eyre!(
            "expected {count} failed steps, got {failed} of {}",
            steps.len()
        ));
    }
    Ok(())
}

#[then(r#"the final response names the attempted agents "{agents}""#)]
fn final_response_names_agents(world: &HandoverWorld, agents: String) -> Result<(), eyre::Report> {
    let expected = format!("No agent produced a response. Attempted agents: {agents}.");
    let response = &world.result()?.final_response;
    if *response != expected {
        return Err(eyre!("unexpected final response: {response}"));
    }
    Ok(())
}
