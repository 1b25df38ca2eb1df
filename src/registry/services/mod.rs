//! Service layer for the agent registry.

pub mod config;
pub mod monitor;
pub mod registry;

pub use config::RegistryConfig;
pub use monitor::{HealthCycle, HealthMonitorHandle};
pub use registry::{AgentFilter, AgentRegistryService, HealthReport, RegistryError, RegistryResult};
