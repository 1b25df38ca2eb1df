//! Aggregated configuration for an orchestrator.

use crate::a2a::services::MessengerConfig;
use crate::analysis::services::AnalyzerConfig;
use crate::execution::services::ExecutorConfig;
use crate::planning::services::PlannerConfig;
use crate::registry::services::RegistryConfig;

/// Configuration for every component an [`super::Orchestrator`] owns.
///
/// # Examples
///
/// ```
/// use baton::orchestration::OrchestratorConfig;
/// use std::time::Duration;
///
/// let config = OrchestratorConfig::default();
/// assert_eq!(config.executor.step_timeout, Duration::from_secs(120));
/// assert_eq!(config.planner.top_k, 2);
///
/// let local = OrchestratorConfig::local_development();
/// assert!(local.registry.health_interval < config.registry.health_interval);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrchestratorConfig {
    /// Registry health and discovery policy.
    pub registry: RegistryConfig,
    /// Classification call settings.
    pub analyzer: AnalyzerConfig,
    /// Agent selection policy.
    pub planner: PlannerConfig,
    /// Step and run deadlines.
    pub executor: ExecutorConfig,
    /// Ad-hoc messaging limits.
    pub messenger: MessengerConfig,
}

impl OrchestratorConfig {
    /// Short registry intervals for local development.
    #[must_use]
    pub fn local_development() -> Self {
        Self {
            registry: RegistryConfig::aggressive(),
            ..Self::default()
        }
    }

    /// Replaces the registry policy.
    #[must_use]
    pub const fn with_registry(mut self, registry: RegistryConfig) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the executor policy.
    #[must_use]
    pub const fn with_executor(mut self, executor: ExecutorConfig) -> Self {
        self.executor = executor;
        self
    }

    /// Replaces the analyzer settings.
    #[must_use]
    pub const fn with_analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Replaces the planner policy.
    #[must_use]
    pub fn with_planner(mut self, planner: PlannerConfig) -> Self {
        self.planner = planner;
        self
    }
}
