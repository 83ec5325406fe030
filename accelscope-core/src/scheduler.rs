//! Fixed-Cadence Tick Scheduler
//!
//! ## State Machine
//!
//! ```text
//!            start()                stop()
//! Stopped ───────────→ Running ───────────→ Stopped
//!    ↑  start() while Running: no-op         │
//!    └──────────────────────────────────────┘
//! ```
//!
//! While `Running` exactly one timer task is alive. It is a Tokio task
//! driving a `tokio::time::interval`; the interval's immediate first tick is
//! consumed up front, so the first callback fires one full period after
//! `start()`.
//!
//! The scheduler knows nothing about metrics. It invokes a callback once per
//! period; the callback returns [`ControlFlow::Break`] to end the task (the
//! engine does this once it has been dropped). Hosts that run their own event
//! loop can skip the scheduler entirely and call `Engine::tick` themselves.
//!
//! ## Cancellation
//!
//! `stop()` aborts the task's `JoinHandle`. The callback is synchronous, so
//! an abort can only land at the `interval.tick().await` between callbacks,
//! never in the middle of one.

use std::ops::ControlFlow;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::errors::{EngineError, Result};

/// Lifecycle state of the scheduler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    #[default]
    Stopped,
    Running,
}

/// Owner of the single periodic timer task
#[derive(Debug)]
pub struct TickScheduler {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// True while the timer task is alive
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn state(&self) -> SchedulerState {
        if self.is_running() {
            SchedulerState::Running
        } else {
            SchedulerState::Stopped
        }
    }

    /// Spawn the timer task on the current Tokio runtime
    ///
    /// Does nothing if already running. Fails with [`EngineError::NoRuntime`]
    /// when called outside a runtime.
    pub fn start<F>(&mut self, mut on_tick: F) -> Result<SchedulerState>
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        if self.is_running() {
            return Ok(SchedulerState::Running);
        }

        let runtime = Handle::try_current().map_err(|_| EngineError::NoRuntime)?;
        let period = self.period;

        self.handle = Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    log::debug!("tick callback requested shutdown");
                    break;
                }
            }
        }));

        Ok(SchedulerState::Running)
    }

    /// Cancel the timer task; returns whether one was running
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn counting(counter: &Arc<AtomicU32>) -> impl FnMut() -> ControlFlow<()> + Send + 'static {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn start_outside_runtime_fails() {
        let mut scheduler = TickScheduler::new(Duration::from_secs(1));
        let result = scheduler.start(|| ControlFlow::Continue(()));
        assert_eq!(result, Err(EngineError::NoRuntime));
        assert_eq!(scheduler.state(), SchedulerState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_period() {
        let ticks = Arc::new(AtomicU32::new(0));
        let mut scheduler = TickScheduler::new(Duration::from_secs(1));
        scheduler.start(counting(&ticks)).unwrap();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0, "first tick is one period out");

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert_eq!(scheduler.state(), SchedulerState::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_timer() {
        let ticks = Arc::new(AtomicU32::new(0));
        let mut scheduler = TickScheduler::new(Duration::from_secs(1));
        scheduler.start(counting(&ticks)).unwrap();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(scheduler.stop());
        let at_stop = ticks.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), at_stop);
        assert_eq!(scheduler.state(), SchedulerState::Stopped);
        assert!(!scheduler.stop());
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_keeps_single_timer() {
        let ticks = Arc::new(AtomicU32::new(0));
        let mut scheduler = TickScheduler::new(Duration::from_secs(1));
        scheduler.start(counting(&ticks)).unwrap();
        scheduler.start(counting(&ticks)).unwrap();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn break_ends_task() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(100));
        scheduler.start(|| ControlFlow::Break(())).unwrap();

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(scheduler.state(), SchedulerState::Stopped);
    }
}
