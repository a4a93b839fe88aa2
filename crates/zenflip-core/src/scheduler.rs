//! Periodic drivers.
//!
//! A [`TickScheduler`] invokes a callback once per period on the tokio
//! runtime. There is no drift correction; late ticks are skipped rather
//! than burst. Restarting cancels the previous task before spawning the
//! new one, so a stale callback can never fire after a restart.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Period of the time-keeping pulse.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Period of the idle-visibility poll.
pub const IDLE_POLL_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct TickScheduler {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    /// Spawn the driver. The first call happens one `period` from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(period: Duration, on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let mut scheduler = Self {
            period,
            handle: None,
        };
        scheduler.restart(on_tick);
        scheduler
    }

    /// Cancel the current driver and resubscribe with a new callback.
    pub fn restart<F>(&mut self, mut on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.stop();
        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                on_tick();
            }
        }));
    }

    /// Stop the driver. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
