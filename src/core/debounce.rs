//! Debounce timer for bursty input.
//!
//! Arming starts a fresh quiet-period timer and cancels the previous one,
//! so a burst of edits produces a single fire once the user pauses. Each
//! arm gets a generation number; callers compare it with
//! [`Debouncer::is_current`] before acting, which also covers fires that
//! raced with an explicit [`Debouncer::cancel`].

use std::time::Duration;
use tokio::task::AbortHandle;

pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<AbortHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Cancels any pending timer and arms a new one. After the quiet
    /// period `fire` runs with this arm's generation. Must be called from
    /// within a tokio runtime.
    pub fn arm<F>(&mut self, fire: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire(generation);
        });
        self.pending = Some(handle.abort_handle());
        generation
    }

    /// Aborts the pending timer, if any, and invalidates its generation.
    /// A fire that was already delivered when the cancel landed fails the
    /// [`Debouncer::is_current`] check.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    /// Whether `generation` belongs to the most recent arm.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}
