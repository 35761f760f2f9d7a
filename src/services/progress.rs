//! Simulated pipeline progress.
//!
//! The analysis service reports nothing until it finishes, so progress is a
//! plain timer that advances a stage counter on a fixed cadence.

use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Starts progress timers.
pub struct ProgressSimulator;

impl ProgressSimulator {
    /// Start a timer calling `on_tick` once per `period`, first one period
    /// after start. A zero period is treated as one millisecond.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(period: Duration, mut on_tick: F) -> ProgressHandle
    where
        F: FnMut() + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                on_tick();
            }
        });

        ProgressHandle {
            task: Some(task.abort_handle()),
        }
    }
}

/// Handle to a running timer. Dropping it stops the timer.
#[derive(Debug, Default)]
pub struct ProgressHandle {
    task: Option<AbortHandle>,
}

impl ProgressHandle {
    /// A handle with no timer behind it.
    pub fn idle() -> Self {
        Self { task: None }
    }

    /// Stop the timer. Safe to call any number of times.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
