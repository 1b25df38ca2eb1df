//! Domain model for agent selection.

mod keywords;
mod plan;

pub use keywords::{
    INTENT_WEIGHT, Keyword, PRIMARY_DOMAIN_WEIGHT, SECONDARY_DOMAIN_WEIGHT, keywords_for, tokenize,
};
pub use plan::{ExecutionPlan, HandoffStrategy, PlanStep, PlanningError};
