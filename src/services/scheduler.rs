//! Periodic driver for the poll cycle.
//!
//! Runs one cycle immediately at startup, then one per interval, forever.
//! Cycles are serialized by construction: the cycle future is awaited on
//! this task before the next tick is observed, so a cycle that overruns
//! its interval delays the next one instead of overlapping it. That
//! serialization is what lets the ledger go unlocked.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use super::poll_cycle::PollCycle;

/// Handle for stopping a running [`PollDaemon`].
#[derive(Debug, Clone)]
pub struct DaemonHandle {
    stop_flag: Arc<AtomicBool>,
}

impl DaemonHandle {
    /// Request the daemon stop after the current cycle.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Release);
    }
}

/// Long-lived periodic driver owning the poll cycle.
pub struct PollDaemon {
    cycle: PollCycle,
    poll_interval: Duration,
    stop_flag: Arc<AtomicBool>,
}

impl PollDaemon {
    /// Create a daemon that runs `cycle` every `poll_interval`.
    pub fn new(cycle: PollCycle, poll_interval: Duration) -> Self {
        Self {
            cycle,
            poll_interval,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a handle to stop the daemon.
    pub fn handle(&self) -> DaemonHandle {
        DaemonHandle {
            stop_flag: self.stop_flag.clone(),
        }
    }

    /// Run until stopped.
    ///
    /// The first tick completes immediately, giving the startup cycle; a
    /// cycle failure (source fetch down) is logged and the schedule keeps
    /// going.
    pub async fn run(mut self) {
        tracing::info!(
            interval_secs = self.poll_interval.as_secs(),
            "Poll daemon started"
        );

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if self.stop_flag.load(Ordering::Acquire) {
                break;
            }

            match self.cycle.poll_once().await {
                Ok(stats) => {
                    tracing::debug!(mirrored = stats.mirrored, "Cycle finished");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Poll cycle failed, waiting for next interval");
                }
            }

            if self.stop_flag.load(Ordering::Acquire) {
                break;
            }
        }

        tracing::info!("Poll daemon stopped");
    }
}
