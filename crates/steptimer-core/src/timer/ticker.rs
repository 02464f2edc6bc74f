//! Cancellable periodic tick source.
//!
//! Ticks are delivered through a channel so the owner of the engine consumes
//! them in arrival order on its own task. Cancelling aborts the interval task
//! and drains anything already queued, so `next` yields nothing afterwards.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[derive(Debug)]
pub struct Ticker {
    rx: mpsc::Receiver<Instant>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking every `period`, first tick one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            // A late tick is not replayed; remaining time is resampled anyway.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                let at = interval.tick().await;
                if tx.send(at).await.is_err() {
                    break;
                }
            }
        });
        Self {
            rx,
            task: Some(task),
        }
    }

    /// Wait for the next tick. Returns `None` once cancelled.
    pub async fn next(&mut self) -> Option<Instant> {
        if self.task.is_none() {
            return None;
        }
        self.rx.recv().await
    }

    /// Stop ticking. Safe to call any number of times.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.rx.close();
            while self.rx.try_recv().is_ok() {}
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.is_none()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
