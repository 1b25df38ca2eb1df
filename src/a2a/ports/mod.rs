//! Port contracts for the agent-to-agent protocol.

mod client;
mod directory;
mod handler;
mod tool;

pub use client::{A2aOperation, AgentClient, AgentClientError, AgentClientResult};
pub use directory::{AgentDirectory, DirectoryLookupError};
pub use handler::AgentHandler;
pub use tool::{AgentTool, ToolOutput};
