//! Agent relevance scoring.

use crate::planning::domain::Keyword;
use crate::registry::domain::{AgentDescriptor, Capability};

/// Points for a capability equal to a keyword.
pub const EXACT_MATCH: u32 = 4;
/// Points for a capability containing a keyword, or vice versa.
pub const SUBSTRING_MATCH: u32 = 3;
/// Points for a capability sharing a stem with a keyword.
pub const STEM_MATCH: u32 = 3;
/// Points for a capability in the same concept group as a keyword.
pub const CONCEPT_MATCH: u32 = 2;

const MIN_STEM_CHARS: usize = 5;
const MIN_SUBSTRING_CHARS: usize = 3;

const CONCEPT_GROUPS: &[&[&str]] = &[
    &[
        "math", "maths", "mathematics", "mathematical", "arithmetic", "calculate", "calculation",
        "calculator", "compute", "computation", "multiply", "multiplication", "divide",
        "division", "addition", "subtract", "equation", "algebra", "numbers", "numeric",
    ],
    &[
        "summarize", "summarise", "summary", "explain", "explanation", "write", "writing",
        "writer", "describe", "description", "document", "documentation", "report", "prose",
        "narrative", "education", "teaching",
    ],
    &[
        "analysis", "analyze", "analyse", "analytics", "data", "statistics", "insight",
        "insights", "evaluate", "evaluation", "assessment",
    ],
    &[
        "synthesis", "synthesize", "synthesise", "combine", "merge", "integrate", "integration",
        "consolidate",
    ],
    &[
        "research", "search", "lookup", "investigate", "investigation", "facts", "sources",
        "knowledge",
    ],
    &[
        "code", "coding", "programming", "software", "developer", "development", "debug",
        "refactor", "review",
    ],
    &["time", "date", "clock", "calendar", "schedule", "timezone"],
];

/// Relevance of one agent to a set of keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relevance {
    /// Weighted score; zero means irrelevant.
    pub score: u32,
    /// Capabilities that contributed to the score.
    pub matched: Vec<Capability>,
}

/// Scores how well an agent fits a query.
///
/// The planner only relies on scores being comparable within one call.
pub trait RelevanceScorer: Send + Sync {
    /// Scores `agent` against `keywords`.
    fn score(&self, keywords: &[Keyword], agent: &AgentDescriptor) -> Relevance;
}

/// Lexical scorer matching capability tags against keywords.
///
/// Each capability contributes its best keyword match (exact 4, substring
/// 3, shared stem 3, shared concept group 2) multiplied by that keyword's
/// weight. Multi-word tags such as `code-review` are also matched part by
/// part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordScorer;

impl KeywordScorer {
    /// Returns the match points between one capability term and one keyword.
    #[must_use]
    pub fn match_points(term: &str, keyword: &str) -> u32 {
        if term == keyword {
            return EXACT_MATCH;
        }

        let shorter = term.chars().count().min(keyword.chars().count());
        if shorter >= MIN_SUBSTRING_CHARS && (term.contains(keyword) || keyword.contains(term)) {
            return SUBSTRING_MATCH;
        }

        let common_prefix = term
            .chars()
            .zip(keyword.chars())
            .take_while(|(left, right)| left == right)
            .count();
        if common_prefix >= MIN_STEM_CHARS {
            return STEM_MATCH;
        }

        let related = CONCEPT_GROUPS
            .iter()
            .any(|group| group.contains(&term) && group.contains(&keyword));
        if related { CONCEPT_MATCH } else { 0 }
    }

    fn capability_score(capability: &Capability, keywords: &[Keyword]) -> u32 {
        let tag = capability.as_str();
        let terms: Vec<&str> = std::iter::once(tag)
            .chain(tag.split(|ch: char| !ch.is_alphanumeric()))
            .filter(|term| !term.is_empty())
            .collect();

        keywords
            .iter()
            .map(|keyword| {
                let points = terms
                    .iter()
                    .map(|term| Self::match_points(term, keyword.token()))
                    .max()
                    .unwrap_or_default();
                points.saturating_mul(keyword.weight())
            })
            .max()
            .unwrap_or_default()
    }
}

impl RelevanceScorer for KeywordScorer {
    fn score(&self, keywords: &[Keyword], agent: &AgentDescriptor) -> Relevance {
        let mut relevance = Relevance::default();
        for capability in agent.capabilities() {
            let points = Self::capability_score(capability, keywords);
            if points > 0 {
                relevance.score = relevance.score.saturating_add(points);
                relevance.matched.push(capability.clone());
            }
        }
        relevance
    }
}
