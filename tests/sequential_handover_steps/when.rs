//! When steps for sequential handover BDD scenarios.

use super::world::{HandoverWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the query "{query}" is orchestrated"#)]
fn query_is_orchestrated(world: &mut HandoverWorld, query: String) {
    let result = run_async(world.orchestrator.orchestrate(&query));
    world.query = Some(query);
    world.result = Some(result);
}
