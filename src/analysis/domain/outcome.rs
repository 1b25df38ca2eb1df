//! Analyzer outcome and default reasons.

use super::QueryClassification;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Why the analyzer fell back to the default classification.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DefaultReason {
    /// The query was blank.
    #[error("query is empty")]
    EmptyQuery,

    /// The model did not answer in time.
    #[error("classification timed out after {0:?}")]
    Timeout(Duration),

    /// The inference call failed.
    #[error("classification inference failed: {0}")]
    Inference(String),

    /// The model output contained no usable JSON object.
    #[error("classification output could not be parsed: {0}")]
    Parse(String),

    /// The JSON object carried none of the expected fields.
    #[error("classification output is missing every expected field")]
    MissingFields,
}

/// Result of analysing a query.
///
/// Both variants carry a usable classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClassificationOutcome {
    /// The model output was parsed.
    Classified {
        /// Parsed classification.
        classification: QueryClassification,
    },
    /// The default classification was substituted.
    Defaulted {
        /// Default classification for the query.
        classification: QueryClassification,
        /// Why parsing was abandoned.
        reason: DefaultReason,
    },
}

impl ClassificationOutcome {
    /// Wraps a parsed classification.
    #[must_use]
    pub const fn classified(classification: QueryClassification) -> Self {
        Self::Classified { classification }
    }

    /// Substitutes the default classification for `query`.
    #[must_use]
    pub fn defaulted(query: &str, reason: DefaultReason) -> Self {
        Self::Defaulted {
            classification: QueryClassification::fallback(query),
            reason,
        }
    }

    /// Returns the classification to plan with.
    #[must_use]
    pub const fn classification(&self) -> &QueryClassification {
        match self {
            Self::Classified { classification } | Self::Defaulted { classification, .. } => {
                classification
            }
        }
    }

    /// Returns why the default was used, if it was.
    #[must_use]
    pub const fn default_reason(&self) -> Option<&DefaultReason> {
        match self {
            Self::Classified { .. } => None,
            Self::Defaulted { reason, .. } => Some(reason),
        }
    }

    /// Returns whether the default classification was substituted.
    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }
}
