use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Cancellable quiet-period timer over a single pending value.
///
/// Every `push` replaces the pending value and restarts the timer, so a value
/// is only released by `poll` after a full quiet period without newer input.
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.quiet,
        });
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending value once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Debounces a watched value.
///
/// Spawns a driver task on the current tokio runtime. The returned receiver
/// starts at the source's current value and only changes when a newer value
/// survives `quiet` uninterrupted and differs from the last output. The driver
/// stops, dropping anything pending, on cancellation, when the source closes or
/// when every output receiver is gone.
pub fn debounce<T>(
    mut source: watch::Receiver<T>,
    quiet: Duration,
    cancel: CancellationToken,
) -> watch::Receiver<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let initial = source.borrow_and_update().clone();
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        let mut debouncer = Debouncer::new(quiet);

        loop {
            let deadline = debouncer.deadline();

            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,
                _ = tx.closed() => break,
                changed = source.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let value = source.borrow_and_update().clone();
                    debouncer.push(value, Instant::now());
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(value) = debouncer.poll(Instant::now()) {
                        tx.send_if_modified(|current| {
                            if *current == value {
                                false
                            } else {
                                *current = value;
                                true
                            }
                        });
                    }
                }
            }
        }

        if debouncer.is_pending() {
            tracing::debug!("[DEBOUNCE] Dropping pending value on teardown");
        }
        debouncer.cancel();
    });

    rx
}
