use crate::registry::types::now_ms;
use crate::registry::{WorkerKey, WorkerRegistry};
use crate::transport::{WorkerTransport, bounded};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

/// Outcome of probing one worker, reported by `run_cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    StillUp,
    Recovered,
    StillDown,
    WentDown,
}

/// Periodically probes every worker and keeps the registry current.
pub struct HealthMonitor {
    registry: Arc<WorkerRegistry>,
    transport: Arc<dyn WorkerTransport>,
    interval: Duration,
    timeout: Duration,
}

impl HealthMonitor {
    pub fn new(
        registry: Arc<WorkerRegistry>,
        transport: Arc<dyn WorkerTransport>,
        interval: Duration,
        timeout: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            registry,
            transport,
            interval,
            timeout,
        })
    }

    /// Spawns the heartbeat loop. The first cycle runs immediately.
    pub fn start(self: Arc<Self>) -> MonitorHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        tracing::info!(
            "Starting health monitor for {} workers (every {:?}, timeout {:?})",
            self.registry.worker_count(),
            self.interval,
            self.timeout
        );

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        self.run_cycle().await;
                    }
                    _ = shutdown_rx.changed() => {
                        tracing::info!("Health monitor stopped");
                        break;
                    }
                }
            }
        });

        MonitorHandle {
            shutdown: shutdown_tx,
            handle,
        }
    }

    /// Probes every worker in parallel and waits for all of them.
    ///
    /// A probe never fails the cycle: errors become status flips, and a probe
    /// task that dies is logged and skipped.
    pub async fn run_cycle(self: &Arc<Self>) -> Vec<(WorkerKey, ProbeOutcome)> {
        let mut probes = JoinSet::new();

        for key in self.registry.topology().worker_keys() {
            let monitor = self.clone();
            probes.spawn(async move {
                let outcome = monitor.probe(&key).await;
                (key, outcome)
            });
        }

        let mut outcomes = Vec::with_capacity(probes.len());
        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => tracing::error!("Health probe task failed: {}", e),
            }
        }

        tracing::debug!(
            "Health cycle finished: {}/{} workers available",
            self.registry.available_count(),
            self.registry.worker_count()
        );

        outcomes
    }

    async fn probe(&self, key: &WorkerKey) -> ProbeOutcome {
        let call = self.transport.health(&key.endpoint, self.timeout);
        let result = bounded(self.timeout, call).await;

        match result {
            Ok(()) => match self.registry.mark_available(key, now_ms()) {
                Ok(true) => ProbeOutcome::StillUp,
                Ok(false) => {
                    tracing::info!(
                        "Worker {} in region {} recovered",
                        key.endpoint,
                        key.region
                    );
                    ProbeOutcome::Recovered
                }
                Err(e) => {
                    tracing::error!("Failed to record health of {}: {}", key, e);
                    ProbeOutcome::StillUp
                }
            },
            Err(err) => match self.registry.mark_unavailable(key) {
                Ok(true) => {
                    tracing::warn!(
                        "Worker {} in region {} is unavailable: {}",
                        key.endpoint,
                        key.region,
                        err
                    );
                    ProbeOutcome::WentDown
                }
                Ok(false) => {
                    tracing::debug!("Worker {} still down: {}", key, err);
                    ProbeOutcome::StillDown
                }
                Err(e) => {
                    tracing::error!("Failed to record health of {}: {}", key, e);
                    ProbeOutcome::StillDown
                }
            },
        }
    }
}

/// Owner side of a running heartbeat loop. Dropping it also ends the loop.
pub struct MonitorHandle {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl MonitorHandle {
    /// Signals the loop and waits for it to exit. A cycle in progress finishes first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            tracing::error!("Health monitor task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
