//! Auto-clear timer for the engine's error state.

use super::ShellEvent;
use crate::calculator::ErrorState;
use flume::Sender;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// A timer scheduled for one error epoch.
struct Scheduled {
    epoch: u64,
    handle: JoinHandle<()>,
}

/// Schedules an [`ShellEvent::ErrorExpired`] when the engine enters an
/// error, and cancels it when the error goes away first.
pub struct AutoClear {
    delay: Duration,
    scheduled: Option<Scheduled>,
}

impl AutoClear {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            scheduled: None,
        }
    }

    /// Bring the timer in line with the engine's current error state.
    ///
    /// Must be called from within a tokio runtime.
    pub fn sync(&mut self, error: Option<ErrorState>, events: &Sender<ShellEvent>) {
        match error {
            Some(error) if self.scheduled_epoch() == Some(error.epoch) => {}
            Some(error) => {
                self.cancel();
                self.schedule(error.epoch, events.clone());
            }
            None => self.cancel(),
        }
    }

    fn schedule(&mut self, epoch: u64, events: Sender<ShellEvent>) {
        let delay = self.delay;
        debug!(epoch, ?delay, "scheduling error auto-clear");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The shell may already be gone
            let _ = events.send_async(ShellEvent::ErrorExpired(epoch)).await;
        });

        self.scheduled = Some(Scheduled { epoch, handle });
    }

    /// Cancel the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(scheduled) = self.scheduled.take() {
            if !scheduled.handle.is_finished() {
                debug!(epoch = scheduled.epoch, "cancelling error auto-clear");
            }
            scheduled.handle.abort();
        }
    }

    /// Epoch of the error the timer is scheduled for.
    pub fn scheduled_epoch(&self) -> Option<u64> {
        self.scheduled.as_ref().map(|s| s.epoch)
    }
}

impl Drop for AutoClear {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::CalcError;

    fn error(epoch: u64) -> Option<ErrorState> {
        Some(ErrorState {
            kind: CalcError::DivideByZero,
            epoch,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, rx) = flume::unbounded();
        let mut timer = AutoClear::new(Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        timer.sync(error(1), &tx);
        assert_eq!(timer.scheduled_epoch(), Some(1));

        let event = rx.recv_async().await.unwrap();
        assert_eq!(event, ShellEvent::ErrorExpired(1));
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_epoch_is_not_rescheduled() {
        let (tx, rx) = flume::unbounded();
        let mut timer = AutoClear::new(Duration::from_secs(2));

        timer.sync(error(1), &tx);
        tokio::time::advance(Duration::from_millis(1500)).await;
        timer.sync(error(1), &tx);

        let start = tokio::time::Instant::now();
        assert_eq!(rx.recv_async().await.unwrap(), ShellEvent::ErrorExpired(1));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let (tx, rx) = flume::unbounded();
        let mut timer = AutoClear::new(Duration::from_secs(2));

        timer.sync(error(1), &tx);
        timer.sync(None, &tx);
        assert_eq!(timer.scheduled_epoch(), None);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_epoch_replaces_old_timer() {
        let (tx, rx) = flume::unbounded();
        let mut timer = AutoClear::new(Duration::from_secs(2));

        timer.sync(error(1), &tx);
        timer.sync(error(2), &tx);

        assert_eq!(rx.recv_async().await.unwrap(), ShellEvent::ErrorExpired(2));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
