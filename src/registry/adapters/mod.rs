//! Adapter implementations for the registry catalog port.

pub mod memory;

pub use memory::InMemoryAgentCatalog;
