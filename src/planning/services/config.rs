//! Planner selection policy.

use crate::registry::domain::AgentDescriptor;

/// Requires agents with one capability to run before agents with another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteRule {
    before: String,
    after: String,
}

impl PrerequisiteRule {
    /// Creates a rule placing `before` ahead of `after`.
    ///
    /// Tags are trimmed and lowercased to match normalised capabilities.
    #[must_use]
    pub fn new(before: &str, after: &str) -> Self {
        Self {
            before: before.trim().to_lowercase(),
            after: after.trim().to_lowercase(),
        }
    }

    /// Returns the capability that must come first.
    #[must_use]
    pub fn before(&self) -> &str {
        &self.before
    }

    /// Returns the capability that must come later.
    #[must_use]
    pub fn after(&self) -> &str {
        &self.after
    }

    pub(crate) fn is_prerequisite(&self, agent: &AgentDescriptor) -> bool {
        declares(agent, &self.before) && !declares(agent, &self.after)
    }

    pub(crate) fn is_dependent(&self, agent: &AgentDescriptor) -> bool {
        declares(agent, &self.after) && !declares(agent, &self.before)
    }
}

fn declares(agent: &AgentDescriptor, tag: &str) -> bool {
    agent
        .capabilities()
        .iter()
        .any(|capability| capability.as_str() == tag)
}

/// Selection policy for the agent planner.
///
/// # Examples
///
/// ```
/// use baton::planning::services::{PlannerConfig, PrerequisiteRule};
///
/// let config = PlannerConfig::default()
///     .with_top_k(3)
///     .with_prerequisite(PrerequisiteRule::new("research", "writer"));
/// assert_eq!(config.top_k, 3);
/// assert_eq!(config.min_relevance, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Maximum agents in a sequential or parallel plan.
    pub top_k: usize,
    /// Minimum relevance score an agent needs to be selected.
    pub min_relevance: u32,
    /// Ordering constraints applied after ranking.
    pub prerequisites: Vec<PrerequisiteRule>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            top_k: 2,
            min_relevance: 2,
            prerequisites: vec![
                PrerequisiteRule::new("analysis", "synthesis"),
                PrerequisiteRule::new("calculator", "summarize"),
                PrerequisiteRule::new("research", "summarize"),
            ],
        }
    }
}

impl PlannerConfig {
    /// Sets the plan length cap.
    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets the relevance threshold.
    #[must_use]
    pub const fn with_min_relevance(mut self, min_relevance: u32) -> Self {
        self.min_relevance = min_relevance;
        self
    }

    /// Adds an ordering constraint.
    #[must_use]
    pub fn with_prerequisite(mut self, rule: PrerequisiteRule) -> Self {
        self.prerequisites.push(rule);
        self
    }

    /// Removes every ordering constraint.
    #[must_use]
    pub fn without_prerequisites(mut self) -> Self {
        self.prerequisites.clear();
        self
    }
}
