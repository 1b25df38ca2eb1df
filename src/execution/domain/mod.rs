//! Domain model for sequential handover execution.

mod ids;
mod step;
mod trace;

pub use ids::RunId;
pub use step::{HandoverStep, StepError, StepStatus};
pub use trace::{ExecutionOutcome, HandoverTrace};
