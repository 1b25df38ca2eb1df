//! Query classification value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain reported when the model gives none.
pub const UNKNOWN_DOMAIN: &str = "Unknown";

/// Expertise level the query is pitched at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnicalLevel {
    /// No prior knowledge assumed.
    #[default]
    Beginner,
    /// Working knowledge assumed.
    Intermediate,
    /// Expert knowledge assumed.
    Advanced,
}

impl TechnicalLevel {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parses a model-reported level, falling back to `Beginner`.
    #[must_use]
    pub fn from_reported(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" | "expert" => Self::Advanced,
            _ => Self::Beginner,
        }
    }
}

impl fmt::Display for TechnicalLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// How the selected agents should cooperate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrchestrationPattern {
    /// Agents run one after another, each building on the last.
    #[default]
    Sequential,
    /// A single agent answers.
    Direct,
    /// Agents work independently on the same query.
    Parallel,
}

impl OrchestrationPattern {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Direct => "direct",
            Self::Parallel => "parallel",
        }
    }

    /// Parses a model-reported pattern, falling back to `Sequential`.
    #[must_use]
    pub fn from_reported(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "direct" | "single" => Self::Direct,
            "parallel" | "concurrent" => Self::Parallel,
            _ => Self::Sequential,
        }
    }
}

impl fmt::Display for OrchestrationPattern {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Subject matter of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainAnalysis {
    primary_domain: String,
    technical_level: TechnicalLevel,
    secondary_domains: Vec<String>,
}

impl DomainAnalysis {
    /// Creates a domain analysis.
    ///
    /// A blank primary domain becomes [`UNKNOWN_DOMAIN`]. Secondary domains
    /// are trimmed; blanks and repeats of the primary domain are dropped.
    #[must_use]
    pub fn new<I, S>(primary_domain: &str, technical_level: TechnicalLevel, secondary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let primary = match primary_domain.trim() {
            "" => UNKNOWN_DOMAIN.to_owned(),
            trimmed => trimmed.to_owned(),
        };

        let mut secondary_domains: Vec<String> = Vec::new();
        for domain in secondary {
            let trimmed = domain.as_ref().trim();
            let repeated = trimmed.eq_ignore_ascii_case(&primary)
                || secondary_domains
                    .iter()
                    .any(|seen| seen.eq_ignore_ascii_case(trimmed));
            if !trimmed.is_empty() && !repeated {
                secondary_domains.push(trimmed.to_owned());
            }
        }

        Self {
            primary_domain: primary,
            technical_level,
            secondary_domains,
        }
    }

    /// Returns the `Unknown` / beginner analysis.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_DOMAIN, TechnicalLevel::Beginner, Vec::<String>::new())
    }

    /// Returns the primary domain. Never empty.
    #[must_use]
    pub fn primary_domain(&self) -> &str {
        &self.primary_domain
    }

    /// Returns whether the primary domain is [`UNKNOWN_DOMAIN`].
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.primary_domain == UNKNOWN_DOMAIN
    }

    /// Returns the technical level.
    #[must_use]
    pub const fn technical_level(&self) -> TechnicalLevel {
        self.technical_level
    }

    /// Returns the secondary domains.
    #[must_use]
    pub fn secondary_domains(&self) -> &[String] {
        &self.secondary_domains
    }
}

/// Structured interpretation of a user query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryClassification {
    user_intent: String,
    domain_analysis: DomainAnalysis,
    orchestration_pattern: OrchestrationPattern,
}

impl QueryClassification {
    /// Creates a classification.
    #[must_use]
    pub fn new(
        user_intent: impl Into<String>,
        domain_analysis: DomainAnalysis,
        orchestration_pattern: OrchestrationPattern,
    ) -> Self {
        Self {
            user_intent: user_intent.into(),
            domain_analysis,
            orchestration_pattern,
        }
    }

    /// Returns the safe default for `query`: the query itself as intent,
    /// an unknown beginner domain, and sequential orchestration.
    #[must_use]
    pub fn fallback(query: &str) -> Self {
        Self::new(
            query.trim(),
            DomainAnalysis::unknown(),
            OrchestrationPattern::Sequential,
        )
    }

    /// Returns the one-sentence intent.
    #[must_use]
    pub fn user_intent(&self) -> &str {
        &self.user_intent
    }

    /// Returns the domain analysis.
    #[must_use]
    pub const fn domain_analysis(&self) -> &DomainAnalysis {
        &self.domain_analysis
    }

    /// Returns the orchestration pattern.
    #[must_use]
    pub const fn orchestration_pattern(&self) -> OrchestrationPattern {
        self.orchestration_pattern
    }
}
