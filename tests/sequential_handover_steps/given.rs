//! Given steps for sequential handover BDD scenarios.

use super::world::{HandoverWorld, echo_agent, endpoint, math_agent, run_async};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::given;

#[given("a math agent with the calculator tool")]
fn a_math_agent(world: &mut HandoverWorld) -> Result<(), eyre::Report> {
    world.mount(math_agent()?)
}

#[given("a writer agent that summarizes results")]
fn a_writer_agent(world: &mut HandoverWorld) -> Result<(), eyre::Report> {
    world.mount(echo_agent("writer-agent", "Writer Agent", "summarize")?)
}

#[given("both agents are discovered by the orchestrator")]
fn both_agents_discovered(world: &mut HandoverWorld) -> Result<(), eyre::Report> {
    for id in ["math-agent", "writer-agent"] {
        let address = endpoint(id)?;
        run_async(world.orchestrator.registry().discover(&address))
            .wrap_err_with(|| format!("discover {id}"))?;
    }
    Ok(())
}

#[given(r#"the "{agent}" endpoint answers with HTTP {code:u16}"#)]
fn endpoint_answers_with_error(
    world: &mut HandoverWorld,
    agent: String,
    code: u16,
) -> Result<(), eyre::Report> {
    world
        .network
        .set_http_error(&endpoint(&agent)?, code)
        .map_err(|err| eyre!("fault injection failed: {err}"))
}
