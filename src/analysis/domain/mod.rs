//! Domain model for query analysis.
//!
//! A [`QueryClassification`] captures the intent, subject matter and
//! orchestration shape of one user query. The analyzer never fails: it
//! yields a [`ClassificationOutcome`] that always carries a usable
//! classification.

mod classification;
mod outcome;
mod parse;

pub use classification::{
    DomainAnalysis, OrchestrationPattern, QueryClassification, TechnicalLevel, UNKNOWN_DOMAIN,
};
pub use outcome::{ClassificationOutcome, DefaultReason};
pub use parse::parse_classification;
