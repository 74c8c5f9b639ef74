//! Collapses a burst of input events into one delayed trigger.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Holds at most one pending value and the instant it becomes due.
///
/// `schedule` replaces both the value and the deadline, so only the last
/// value of a burst is ever emitted. The owner drives emission by awaiting
/// [`Debouncer::fired`], typically inside a `tokio::select!` next to its
/// other event sources. Dropping the debouncer (or calling `cancel`) discards
/// whatever is pending; nothing runs in the background.
#[derive(Debug)]
pub struct Debouncer<T> {
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Records `value` and restarts the timer.
    pub fn schedule(&mut self, value: T, delay: Duration) {
        self.pending = Some(Pending {
            value,
            deadline: Instant::now() + delay,
        });
    }

    /// Discards any pending emission.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the scheduled value once its deadline passes.
    ///
    /// Never resolves while nothing is scheduled. Cancel safe: dropping the
    /// future before it completes leaves the pending value in place.
    pub async fn fired(&mut self) -> T {
        loop {
            let deadline = match &self.pending {
                Some(pending) => pending.deadline,
                None => std::future::pending::<Instant>().await,
            };
            sleep_until(deadline).await;

            if let Some(pending) = self.pending.take() {
                return pending.value;
            }
        }
    }
}
