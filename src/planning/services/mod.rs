//! Service layer for agent selection.

mod config;
mod planner;
mod scorer;

pub use config::{PlannerConfig, PrerequisiteRule};
pub use planner::AgentPlanner;
pub use scorer::{
    CONCEPT_MATCH, EXACT_MATCH, KeywordScorer, Relevance, RelevanceScorer, STEM_MATCH,
    SUBSTRING_MATCH,
};
