//! Executor timing and context policy.

use std::time::Duration;

/// Timing and context policy for the handover executor.
///
/// # Examples
///
/// ```
/// use baton::execution::services::ExecutorConfig;
/// use std::time::Duration;
///
/// let config = ExecutorConfig::default();
/// assert_eq!(config.run_budget(2), Duration::from_secs(270));
///
/// let capped = config.with_run_deadline(Duration::from_secs(60));
/// assert_eq!(capped.run_budget(2), Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Deadline for one `POST /execute` call.
    pub step_timeout: Duration,
    /// Characters of the previous output carried into a handover message.
    pub handover_context_chars: usize,
    /// Allowance added to `steps × step_timeout` for the run budget.
    pub run_slack: Duration,
    /// Explicit run budget overriding the computed one.
    pub run_deadline: Option<Duration>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            step_timeout: Duration::from_secs(120),
            handover_context_chars: 2000,
            run_slack: Duration::from_secs(30),
            run_deadline: None,
        }
    }
}

impl ExecutorConfig {
    /// Sets the per-step deadline.
    #[must_use]
    pub const fn with_step_timeout(mut self, step_timeout: Duration) -> Self {
        self.step_timeout = step_timeout;
        self
    }

    /// Sets an explicit run budget.
    #[must_use]
    pub const fn with_run_deadline(mut self, run_deadline: Duration) -> Self {
        self.run_deadline = Some(run_deadline);
        self
    }

    /// Sets the handover context bound.
    #[must_use]
    pub const fn with_handover_context_chars(mut self, chars: usize) -> Self {
        self.handover_context_chars = chars;
        self
    }

    /// Returns the total time allowed for a plan of `steps` steps.
    #[must_use]
    pub fn run_budget(&self, steps: usize) -> Duration {
        self.run_deadline.unwrap_or_else(|| {
            let count = u32::try_from(steps).unwrap_or(u32::MAX);
            self.step_timeout
                .saturating_mul(count)
                .saturating_add(self.run_slack)
        })
    }
}
