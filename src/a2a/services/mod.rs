//! Agent-side runtime, built-in tools and peer messaging.

pub mod messenger;
pub mod runtime;
pub mod tools;

pub use messenger::{A2aMessenger, MessengerConfig, MessagingError};
pub use runtime::{AgentProfile, AgentRuntime, RuntimeConfig};
pub use tools::{CalculatorTool, ClockTool, LookupTool};
