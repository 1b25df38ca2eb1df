//! Agent-local tool contract.

/// Output produced by a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    tool_name: String,
    content: String,
}

impl ToolOutput {
    /// Creates a tool output.
    #[must_use]
    pub fn new(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            content: content.into(),
        }
    }

    /// Returns the name of the tool that produced this output.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Returns the tool result text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A named tool an agent may dispatch while producing a response.
///
/// The protocol only surfaces tool names in `tools_used`; implementations are
/// private to the agent.
pub trait AgentTool: Send + Sync {
    /// Returns the tool name reported in `tools_used`.
    fn name(&self) -> &str;

    /// Runs the tool against the agent input.
    ///
    /// Returns `None` when the input gives the tool nothing to do.
    fn invoke(&self, input: &str) -> Option<ToolOutput>;
}
