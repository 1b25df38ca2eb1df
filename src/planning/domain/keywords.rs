//! Weighted keywords extracted from a classification.

use crate::analysis::domain::QueryClassification;

/// Weight of tokens from the primary domain.
pub const PRIMARY_DOMAIN_WEIGHT: u32 = 3;
/// Weight of tokens from secondary domains.
pub const SECONDARY_DOMAIN_WEIGHT: u32 = 2;
/// Weight of tokens from the user intent.
pub const INTENT_WEIGHT: u32 = 2;

const MIN_TOKEN_CHARS: usize = 3;

const STOP_WORDS: &[&str] = &[
    "about", "after", "all", "also", "and", "any", "are", "but", "can", "could", "does", "for",
    "from", "get", "give", "has", "have", "help", "how", "into", "its", "just", "need",
    "not", "please", "should", "some", "than", "that", "the", "their", "them", "then", "there",
    "these", "this", "those", "unknown", "user", "wants", "want", "was", "what", "when", "where",
    "which", "who", "why", "will", "with", "would", "you", "your",
];

/// A query keyword and how much a match on it counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    token: String,
    weight: u32,
}

impl Keyword {
    /// Creates a keyword.
    #[must_use]
    pub fn new(token: impl Into<String>, weight: u32) -> Self {
        Self {
            token: token.into(),
            weight,
        }
    }

    /// Returns the normalised token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the weight.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }
}

/// Splits `text` into lowercase alphanumeric tokens.
///
/// Stop-words and tokens shorter than three characters are dropped.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
}

/// Extracts the weighted keywords of `classification`.
///
/// A token appearing in several sources keeps its highest weight. Order
/// follows first appearance: primary domain, secondary domains, intent.
#[must_use]
pub fn keywords_for(classification: &QueryClassification) -> Vec<Keyword> {
    let domain = classification.domain_analysis();
    let weighted = tokenize(domain.primary_domain())
        .map(|token| (token, PRIMARY_DOMAIN_WEIGHT))
        .chain(domain.secondary_domains().iter().flat_map(|secondary| {
            tokenize(secondary).map(|token| (token, SECONDARY_DOMAIN_WEIGHT))
        }))
        .chain(tokenize(classification.user_intent()).map(|token| (token, INTENT_WEIGHT)));

    let mut keywords: Vec<Keyword> = Vec::new();
    for (token, weight) in weighted {
        match keywords.iter_mut().find(|keyword| keyword.token == token) {
            Some(existing) => existing.weight = existing.weight.max(weight),
            None => keywords.push(Keyword::new(token, weight)),
        }
    }
    keywords
}
