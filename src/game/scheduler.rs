//! Fixed-rate tick loop

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::util::time::tick_period;

use super::handle::GameHandle;
use super::world::TickReport;

/// One step of whatever the scheduler drives
pub trait Simulation: Send + 'static {
    fn tick(&self) -> TickReport;
}

impl Simulation for GameHandle {
    fn tick(&self) -> TickReport {
        GameHandle::tick(self)
    }
}

/// Drives a `Simulation` (normally the `GameHandle`) at a fixed period.
///
/// The loop is a single task: it is idle while awaiting the next interval
/// and advancing while running a tick body, and the next interval is only
/// awaited once the body has returned. Ticks therefore never overlap, and
/// late ticks are skipped rather than burst.
pub struct TickScheduler<S> {
    sim: S,
    period: Duration,
}

impl<S: Simulation> TickScheduler<S> {
    pub fn new(sim: S) -> Self {
        Self::with_period(sim, tick_period())
    }

    pub fn with_period(sim: S, period: Duration) -> Self {
        Self { sim, period }
    }

    /// Spawn the loop. It runs until the returned handle is stopped or dropped.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(shutdown_rx));
        SchedulerHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    async fn run(self, mut shutdown: oneshot::Receiver<()>) {
        info!(period_ms = self.period.as_millis() as u64, "Tick scheduler started");

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut ticks: u64 = 0;

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }

            ticks += 1;
            match catch_unwind(AssertUnwindSafe(|| self.sim.tick())) {
                Ok(report) => {
                    if report.obstacle_hits > 0 || report.pickups > 0 {
                        debug!(
                            tick = ticks,
                            obstacle_hits = report.obstacle_hits,
                            pickups = report.pickups,
                            "Collisions resolved"
                        );
                    }
                }
                Err(_) => {
                    error!(tick = ticks, "Tick panicked, skipping to next interval");
                }
            }
        }

        info!(ticks, "Tick scheduler stopped");
    }
}

/// Control handle for a running scheduler
pub struct SchedulerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Signal the loop to exit and wait for it. An in-flight tick finishes first.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "Tick scheduler task failed");
            }
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
