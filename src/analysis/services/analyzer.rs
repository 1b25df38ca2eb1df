//! Single-call LLM query classification.

use super::AnalyzerConfig;
use crate::analysis::domain::{
    ClassificationOutcome, DefaultReason, QueryClassification, parse_classification,
};
use crate::inference::ports::InferencePort;
use minijinja::Environment;
use serde_json::json;
use std::sync::Arc;

const CLASSIFICATION_TEMPLATE: &str = r#"Classify the user query below for routing to specialist agents.

Respond with a single JSON object and nothing else, using exactly this shape:
{
  "user_intent": "<one sentence describing what the user wants>",
  "domain_analysis": {
    "primary_domain": "<main subject area>",
    "technical_level": "beginner" | "intermediate" | "advanced",
    "secondary_domains": ["<other subject areas involved>"]
  },
  "orchestration_pattern": "sequential" | "direct" | "parallel"
}

Use "direct" when one specialist can answer alone, "sequential" when the
work has stages that build on each other, and "parallel" when independent
specialists could work on it at the same time.

User query:
{{ query }}"#;

/// Classifies queries with one inference call.
pub struct QueryAnalyzer<I>
where
    I: InferencePort,
{
    inference: Arc<I>,
    config: AnalyzerConfig,
}

impl<I> QueryAnalyzer<I>
where
    I: InferencePort,
{
    /// Creates an analyzer with default settings.
    #[must_use]
    pub fn new(inference: Arc<I>) -> Self {
        Self {
            inference,
            config: AnalyzerConfig::default(),
        }
    }

    /// Replaces the inference settings.
    #[must_use]
    pub const fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the inference settings.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Classifies `query`.
    ///
    /// Never fails. Timeouts, inference errors and unparseable output all
    /// yield [`ClassificationOutcome::Defaulted`]. No retries are made.
    pub async fn analyze(&self, query: &str) -> ClassificationOutcome {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return ClassificationOutcome::defaulted(trimmed, DefaultReason::EmptyQuery);
        }

        let outcome = match self.classify(trimmed).await {
            Ok(classification) => ClassificationOutcome::classified(classification),
            Err(reason) => {
                tracing::warn!(reason = %reason, "falling back to default classification");
                ClassificationOutcome::defaulted(trimmed, reason)
            }
        };

        let classification = outcome.classification();
        tracing::info!(
            primary_domain = classification.domain_analysis().primary_domain(),
            pattern = %classification.orchestration_pattern(),
            defaulted = outcome.is_defaulted(),
            "query classified"
        );
        outcome
    }

    async fn classify(&self, query: &str) -> Result<QueryClassification, DefaultReason> {
        let prompt = Environment::new()
            .render_str(CLASSIFICATION_TEMPLATE, json!({ "query": query }))
            .map_err(|err| DefaultReason::Inference(format!("prompt rendering failed: {err}")))?;

        let deadline = self.config.timeout;
        let output = tokio::time::timeout(
            deadline,
            self.inference.generate(&prompt, self.config.constraints),
        )
        .await
        .map_err(|_| DefaultReason::Timeout(deadline))?
        .map_err(|err| {
            if err.is_timeout() {
                DefaultReason::Timeout(deadline)
            } else {
                DefaultReason::Inference(err.to_string())
            }
        })?;

        tracing::debug!(output = %output, "classification output received");
        parse_classification(&output, query)
    }
}
