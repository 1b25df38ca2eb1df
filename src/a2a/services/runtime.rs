//! Agent-side implementation of the A2A protocol.

use crate::a2a::{
    domain::{
        A2aMessage, A2aMessageRequest, A2aReply, AgentId, CapabilityAdvertisement, ExecuteRequest,
        ExecuteResponse, HealthResponse, ResponseStatus,
    },
    ports::{AgentHandler, AgentTool, ToolOutput},
};
use crate::inference::ports::{GenerationConstraints, InferenceError, InferencePort};
use async_trait::async_trait;
use minijinja::Environment;
use mockable::Clock;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

const PROMPT_TEMPLATE: &str = "\
{{ system_prompt }}
{% if tool_results %}
Tool results:
{% for result in tool_results %}- {{ result.tool }}: {{ result.content }}
{% endfor %}{% endif %}
{% if sender %}[message from agent {{ sender }}]
{% endif %}Input:
{{ input }}";

/// Static identity and behaviour of a hosted agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    id: AgentId,
    name: String,
    description: String,
    capabilities: Vec<String>,
    system_prompt: String,
}

impl AgentProfile {
    /// Creates a profile with no capabilities and a generic system prompt.
    #[must_use]
    pub fn new(id: AgentId, name: impl Into<String>) -> Self {
        let display_name: String = name.into();
        let system_prompt = format!("You are {display_name}, a helpful specialist agent.");
        Self {
            id,
            name: display_name,
            description: String::new(),
            capabilities: Vec::new(),
            system_prompt,
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the advertised capability tags.
    #[must_use]
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the system prompt placed at the top of every generation.
    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Returns the agent identifier.
    #[must_use]
    pub const fn id(&self) -> &AgentId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the advertised capability tags.
    #[must_use]
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    /// Builds the `GET /capabilities` body for this profile.
    #[must_use]
    pub fn advertisement(&self) -> CapabilityAdvertisement {
        CapabilityAdvertisement {
            agent_id: Some(self.id.to_string()),
            agent_name: self.name.clone(),
            capabilities: self.capabilities.clone(),
            description: self.description.clone(),
            status: Some("active".to_owned()),
        }
    }
}

/// Generation settings for an [`AgentRuntime`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeConfig {
    /// Constraints passed to every inference call.
    pub constraints: GenerationConstraints,
    /// Deadline for one inference call.
    pub inference_timeout: Duration,
    /// Number of received inter-agent messages retained.
    pub inbox_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            constraints: GenerationConstraints::default(),
            inference_timeout: Duration::from_secs(60),
            inbox_capacity: 100,
        }
    }
}

#[derive(Debug, Error)]
enum RuntimeFailure {
    #[error("input must not be empty")]
    EmptyInput,
    #[error("sender id is invalid: {0}")]
    InvalidSender(String),
    #[error("prompt rendering failed: {0}")]
    Prompt(String),
    #[error("inference timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("model returned an empty completion")]
    EmptyCompletion,
}

/// Hosts one LLM-backed agent behind the [`AgentHandler`] contract.
///
/// `execute` runs every tool whose trigger matches the input, then makes a
/// single inference call with the tool results folded into the prompt.
pub struct AgentRuntime<I, C>
where
    I: InferencePort,
    C: Clock + Send + Sync,
{
    profile: AgentProfile,
    inference: Arc<I>,
    clock: Arc<C>,
    tools: Vec<Arc<dyn AgentTool>>,
    config: RuntimeConfig,
    inbox: Mutex<VecDeque<A2aMessage>>,
}

impl<I, C> AgentRuntime<I, C>
where
    I: InferencePort,
    C: Clock + Send + Sync,
{
    /// Creates a runtime with no tools and default settings.
    #[must_use]
    pub fn new(profile: AgentProfile, inference: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            profile,
            inference,
            clock,
            tools: Vec::new(),
            config: RuntimeConfig::default(),
            inbox: Mutex::new(VecDeque::new()),
        }
    }

    /// Adds a tool.
    #[must_use]
    pub fn with_tool(mut self, tool: impl AgentTool + 'static) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }

    /// Replaces the generation settings.
    #[must_use]
    pub const fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the hosted agent's profile.
    #[must_use]
    pub const fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Returns the retained inter-agent messages, oldest first.
    #[must_use]
    pub fn inbox(&self) -> Vec<A2aMessage> {
        self.inbox
            .lock()
            .map(|inbox| inbox.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn run_tools(&self, input: &str) -> (Vec<ToolOutput>, Vec<String>) {
        let outputs: Vec<ToolOutput> = self
            .tools
            .iter()
            .filter_map(|tool| tool.invoke(input))
            .collect();
        let names = outputs
            .iter()
            .map(|output| output.tool_name().to_owned())
            .collect();
        (outputs, names)
    }

    fn render_prompt(
        &self,
        input: &str,
        tool_outputs: &[ToolOutput],
        sender: Option<&AgentId>,
    ) -> Result<String, RuntimeFailure> {
        let tool_results: Vec<_> = tool_outputs
            .iter()
            .map(|output| json!({ "tool": output.tool_name(), "content": output.content() }))
            .collect();
        let context = json!({
            "system_prompt": self.profile.system_prompt,
            "tool_results": tool_results,
            "sender": sender.map(AgentId::as_str),
            "input": input,
        });

        Environment::new()
            .render_str(PROMPT_TEMPLATE, context)
            .map_err(|err| RuntimeFailure::Prompt(err.to_string()))
    }

    async fn respond(
        &self,
        input: &str,
        sender: Option<&AgentId>,
    ) -> (Result<String, RuntimeFailure>, Vec<String>) {
        let (tool_outputs, tools_used) = self.run_tools(input);
        let result = self.complete(input, &tool_outputs, sender).await;
        (result, tools_used)
    }

    async fn complete(
        &self,
        input: &str,
        tool_outputs: &[ToolOutput],
        sender: Option<&AgentId>,
    ) -> Result<String, RuntimeFailure> {
        let prompt = self.render_prompt(input, tool_outputs, sender)?;
        let deadline = self.config.inference_timeout;

        let text = tokio::time::timeout(
            deadline,
            self.inference.generate(&prompt, self.config.constraints),
        )
        .await
        .map_err(|_| RuntimeFailure::Timeout(deadline))??;

        if text.trim().is_empty() {
            return Err(RuntimeFailure::EmptyCompletion);
        }
        Ok(text)
    }

    fn record(&self, message: A2aMessage) {
        let Ok(mut inbox) = self.inbox.lock() else {
            return;
        };
        if self.config.inbox_capacity == 0 {
            return;
        }
        while inbox.len() >= self.config.inbox_capacity {
            inbox.pop_front();
        }
        inbox.push_back(message);
    }
}

#[async_trait]
impl<I, C> AgentHandler for AgentRuntime<I, C>
where
    I: InferencePort,
    C: Clock + Send + Sync,
{
    async fn health(&self) -> HealthResponse {
        HealthResponse::new("healthy", self.profile.name.clone())
    }

    async fn capabilities(&self) -> CapabilityAdvertisement {
        self.profile.advertisement()
    }

    async fn execute(&self, request: ExecuteRequest) -> ExecuteResponse {
        let started = Instant::now();
        let input = request.input.trim();

        if input.is_empty() {
            return ExecuteResponse::error(
                RuntimeFailure::EmptyInput.to_string(),
                Vec::new(),
                started.elapsed(),
            );
        }

        let (result, tools_used) = self.respond(input, None).await;
        let elapsed = started.elapsed();

        match result {
            Ok(text) => {
                tracing::info!(
                    agent_id = %self.profile.id,
                    tools = ?tools_used,
                    elapsed_ms = elapsed.as_millis(),
                    "agent executed request"
                );
                ExecuteResponse::success(text, tools_used, elapsed)
            }
            Err(failure) => {
                tracing::warn!(
                    agent_id = %self.profile.id,
                    error = %failure,
                    "agent failed to execute request"
                );
                ExecuteResponse::error(failure.to_string(), tools_used, elapsed)
            }
        }
    }

    async fn receive_message(&self, request: A2aMessageRequest) -> A2aReply {
        let sender = match AgentId::new(request.from_agent.as_str()) {
            Ok(sender) => sender,
            Err(err) => {
                let failure = RuntimeFailure::InvalidSender(err.to_string());
                return A2aReply::new(failure.to_string(), ResponseStatus::Error);
            }
        };

        let message = request.message.trim();
        if message.is_empty() {
            return A2aReply::new(RuntimeFailure::EmptyInput.to_string(), ResponseStatus::Error);
        }

        let received = A2aMessage::request(
            sender.clone(),
            self.profile.id.clone(),
            message,
            self.clock.as_ref(),
        );
        let (result, _) = self.respond(message, Some(&sender)).await;

        match result {
            Ok(text) => {
                let reply = A2aMessage::reply_to(&received, text.as_str(), self.clock.as_ref());
                self.record(received);
                self.record(reply);
                A2aReply::new(text, ResponseStatus::Success)
            }
            Err(failure) => {
                tracing::warn!(
                    agent_id = %self.profile.id,
                    from_agent = %sender,
                    error = %failure,
                    "agent failed to answer message"
                );
                self.record(received);
                A2aReply::new(failure.to_string(), ResponseStatus::Error)
            }
        }
    }
}
