//! Analyzer inference settings.

use crate::inference::ports::GenerationConstraints;
use std::time::Duration;

/// Inference settings for the query analyzer.
///
/// # Examples
///
/// ```
/// use baton::analysis::services::AnalyzerConfig;
/// use std::time::Duration;
///
/// let config = AnalyzerConfig::default();
/// assert_eq!(config.constraints.max_tokens, 300);
/// assert_eq!(config.timeout, Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerConfig {
    /// Constraints for the classification call.
    pub constraints: GenerationConstraints,
    /// Deadline for the classification call.
    pub timeout: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            constraints: GenerationConstraints::deterministic(300),
            timeout: Duration::from_secs(30),
        }
    }
}

impl AnalyzerConfig {
    /// Replaces the classification deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
