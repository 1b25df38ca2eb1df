//! Agent selection and ordering.
//!
//! The planner turns a [`crate::analysis::domain::QueryClassification`] and
//! the registry's reachable agents into an [`domain::ExecutionPlan`].
//! Relevance scoring sits behind [`services::RelevanceScorer`]; the default
//! [`services::KeywordScorer`] matches capability tags lexically.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
