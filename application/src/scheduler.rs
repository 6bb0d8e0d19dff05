use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Runs a job every `interval` until cancelled.
///
/// Each tick's job is awaited before the next tick is considered, and ticks
/// missed meanwhile are dropped rather than replayed, so a slow job never
/// stacks up behind itself. The first run happens one interval after spawn.
pub struct RefreshScheduler {
    token: CancellationToken,
    handle: JoinHandle<u64>,
}

impl RefreshScheduler {
    pub fn spawn<F, Fut>(interval: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval() fires immediately; the caller already has fresh data.
            ticker.tick().await;

            let mut runs = 0u64;
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        runs += 1;
                        debug!(run = runs, "scheduled refresh");
                        job().await;
                    }
                }
            }
            debug!(runs, "scheduler stopped");
            runs
        });

        Self { token, handle }
    }

    /// Token that stops the scheduler when cancelled. Cloneable, so a signal
    /// handler can own one.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancels and waits for the task. A job already running is allowed to
    /// finish. Returns how many times the job ran.
    pub async fn shutdown(self) -> u64 {
        self.token.cancel();
        self.handle.await.unwrap_or(0)
    }
}
