//! Service layer for handover execution.

mod config;
mod executor;

pub use config::ExecutorConfig;
pub use executor::SequentialHandoverExecutor;
