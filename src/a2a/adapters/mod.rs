//! Adapter implementations for the A2A client port.

pub mod http;
pub mod memory;

pub use http::HttpAgentClient;
pub use memory::{InMemoryAgentNetwork, InMemoryNetworkError};
