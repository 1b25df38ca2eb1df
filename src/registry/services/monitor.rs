//! Background health monitor for the agent registry.

use super::registry::{AgentRegistryService, HealthReport, RegistryResult};
use crate::a2a::{domain::AgentId, ports::AgentClient};
use crate::registry::ports::AgentCatalog;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Outcome of one monitor cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthCycle {
    /// Status of every agent probed.
    pub reports: Vec<HealthReport>,
    /// Agents evicted after prolonged unreachability.
    pub pruned: Vec<AgentId>,
}

/// Handle to a running health monitor.
///
/// Dropping the handle also stops the monitor at its next wake-up.
#[derive(Debug)]
pub struct HealthMonitorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl HealthMonitorHandle {
    /// Signals the monitor to stop and waits for it to finish.
    pub async fn stop(self) {
        // A send error means the task already exited.
        let _ignored = self.shutdown.send(true);
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "health monitor task ended abnormally");
        }
    }

    /// Returns whether the monitor task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<K, A, C> AgentRegistryService<K, A, C>
where
    K: AgentCatalog + 'static,
    A: AgentClient + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Probes every agent, then prunes the ones due for eviction.
    ///
    /// # Errors
    ///
    /// Returns [`super::RegistryError::Catalog`] when the catalog fails.
    pub async fn run_health_cycle(&self) -> RegistryResult<HealthCycle> {
        let reports = self.health_check_all().await?;
        let pruned = self.prune_unreachable().await?;
        Ok(HealthCycle { reports, pruned })
    }

    /// Spawns a task running [`Self::run_health_cycle`] every
    /// `health_interval`, starting immediately.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use = "dropping the handle stops the monitor"]
    pub fn spawn_health_monitor(self: Arc<Self>) -> HealthMonitorHandle {
        let (shutdown, mut stop_requested) = watch::channel(false);
        let period = self.config().health_interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(interval_ms = period.as_millis(), "health monitor started");

            loop {
                tokio::select! {
                    changed = stop_requested.changed() => {
                        if changed.is_err() || *stop_requested.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        match self.run_health_cycle().await {
                            Ok(cycle) => tracing::debug!(
                                probed = cycle.reports.len(),
                                pruned = cycle.pruned.len(),
                                "health cycle complete"
                            ),
                            Err(err) => tracing::warn!(error = %err, "health cycle failed"),
                        }
                    }
                }
            }

            tracing::info!("health monitor stopped");
        });

        HealthMonitorHandle { shutdown, task }
    }
}
