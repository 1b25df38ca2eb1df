//! Answers one query with a set of running A2A agents.
//!
//! Usage:
//!
//! ```text
//! baton --agent http://localhost:8001 --agent http://localhost:8002 \
//!     "Calculate 15 * 23 and explain the steps"
//! ```
//!
//! Every `--agent` endpoint is discovered through `GET /capabilities`
//! before the query runs. Endpoints that cannot be discovered are skipped
//! with a warning. Queries are classified by an Ollama model. Logging is
//! controlled through `RUST_LOG`.

use anyhow::{Context, Result, bail};
use baton::a2a::{adapters::HttpAgentClient, domain::AgentEndpoint};
use baton::execution::services::ExecutorConfig;
use baton::inference::adapters::{DEFAULT_OLLAMA_BASE_URL, OllamaInference};
use baton::orchestration::{OrchestrationResult, Orchestrator, OrchestratorConfig};
use baton::registry::{adapters::InMemoryAgentCatalog, services::RegistryConfig};
use clap::Parser;
use mockable::DefaultClock;
use serde_json::json;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "baton", version, about = "Capability-driven multi-agent orchestration")]
struct Args {
    /// Base URL of an agent to discover; repeat or comma-separate.
    #[arg(
        long = "agent",
        env = "BATON_AGENTS",
        value_delimiter = ',',
        required = true
    )]
    agents: Vec<String>,

    /// Ollama base URL used for query classification.
    #[arg(long, env = "BATON_OLLAMA_URL", default_value = DEFAULT_OLLAMA_BASE_URL)]
    ollama_url: String,

    /// Model used for query classification.
    #[arg(long, env = "BATON_MODEL", default_value = "llama3.2")]
    model: String,

    /// Deadline for one agent step, in seconds.
    #[arg(long, env = "BATON_STEP_TIMEOUT_SECS", default_value_t = 120)]
    step_timeout_secs: u64,

    /// Overall run deadline, in seconds; derived from the plan when absent.
    #[arg(long, env = "BATON_RUN_DEADLINE_SECS")]
    run_deadline_secs: Option<u64>,

    /// Use short discovery and health timeouts.
    #[arg(long)]
    local: bool,

    /// Print the full result as JSON.
    #[arg(long)]
    json: bool,

    /// Query to answer.
    query: String,
}

impl Args {
    fn config(&self) -> OrchestratorConfig {
        let registry = if self.local {
            RegistryConfig::aggressive()
        } else {
            RegistryConfig::default()
        };
        let mut executor =
            ExecutorConfig::default().with_step_timeout(Duration::from_secs(self.step_timeout_secs));
        if let Some(secs) = self.run_deadline_secs {
            executor = executor.with_run_deadline(Duration::from_secs(secs));
        }

        OrchestratorConfig::default()
            .with_registry(registry)
            .with_executor(executor)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let orchestrator = Orchestrator::new(
        Arc::new(InMemoryAgentCatalog::new()),
        Arc::new(HttpAgentClient::new()),
        Arc::new(OllamaInference::new(args.ollama_url.as_str(), args.model.as_str())),
        Arc::new(DefaultClock),
        args.config(),
    );

    let mut discovered = 0_usize;
    for raw in &args.agents {
        let endpoint = AgentEndpoint::new(raw.as_str())
            .with_context(|| format!("invalid agent endpoint '{raw}'"))?;
        match orchestrator.registry().discover(&endpoint).await {
            Ok(descriptor) => {
                tracing::info!(
                    agent_id = %descriptor.id(),
                    %endpoint,
                    capabilities = descriptor.capabilities().len(),
                    "agent discovered"
                );
                discovered = discovered.saturating_add(1);
            }
            Err(err) => tracing::warn!(%endpoint, error = %err, "agent discovery failed"),
        }
    }
    if discovered == 0 {
        bail!("none of the {} agent endpoints could be discovered", args.agents.len());
    }

    let result = orchestrator.orchestrate(&args.query).await;
    let mut stdout = io::stdout().lock();
    if args.json {
        write_json(&mut stdout, &result)?;
    } else {
        write_text(&mut stdout, &result)?;
    }

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

fn write_json(out: &mut impl Write, result: &OrchestrationResult) -> Result<()> {
    let document = json!({
        "run_id": result.run_id,
        "success": result.success,
        "final_response": result.final_response,
        "classification": result.classification,
        "plan": result.plan,
        "trace": result.trace,
        "failure": result.failure.as_ref().map(ToString::to_string),
        "elapsed_ms": result.elapsed.as_millis(),
    });
    serde_json::to_writer_pretty(&mut *out, &document).context("failed to encode result")?;
    writeln!(out)?;
    Ok(())
}

fn write_text(out: &mut impl Write, result: &OrchestrationResult) -> Result<()> {
    if let Some(plan) = &result.plan {
        let agents: Vec<String> = plan.agent_ids().map(ToString::to_string).collect();
        writeln!(out, "Plan ({}): {}", plan.handoff_strategy(), agents.join(" -> "))?;
    }
    for step in result.trace.steps() {
        let outcome = step
            .error()
            .map_or_else(|| "ok".to_owned(), ToString::to_string);
        writeln!(
            out,
            "  step {} {} [{:.2?}]: {outcome}",
            step.step_index(),
            step.agent_id(),
            step.execution_time()
        )?;
    }
    if let Some(failure) = &result.failure {
        writeln!(out, "Failure: {failure}")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", result.final_response)?;
    Ok(())
}
