//! Sequential handover execution.
//!
//! Runs an [`crate::planning::domain::ExecutionPlan`] step by step over
//! the A2A `POST /execute` route. Each agent's output becomes part of the
//! next agent's input; failures are recorded in the
//! [`domain::HandoverTrace`] and never abort the run.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
