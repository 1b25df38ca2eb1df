//! Contextual query analysis.
//!
//! Turns a free-text query into a [`domain::QueryClassification`] with a
//! single low-temperature inference call. Malformed or missing model output
//! degrades to a safe default instead of failing the run.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
