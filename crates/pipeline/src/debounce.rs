//! Query debouncing
//!
//! Collapses a stream of raw query edits (one per keystroke) into committed
//! query values, emitting at most once per quiescence window after the last
//! edit. The timer resets on every edit rather than accumulating. Teardown
//! while a timer is pending cancels the pending emission outright; no late
//! emission ever reaches a torn-down downstream.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

/// Debouncer task for free-text query edits
///
/// Consumes raw edits from `input` and emits committed values on `output`.
/// Runs until the input channel closes (producer dropped) or the output
/// channel closes (consumer dropped).
pub struct QueryDebouncer {
    window: Duration,
    input: mpsc::Receiver<String>,
    output: mpsc::Sender<String>,
}

impl QueryDebouncer {
    /// Create a debouncer with the given quiescence window
    pub fn new(
        window: Duration,
        input: mpsc::Receiver<String>,
        output: mpsc::Sender<String>,
    ) -> Self {
        Self {
            window,
            input,
            output,
        }
    }

    /// Run the debounce loop
    ///
    /// Call from a spawned task. Returns when either side of the channel
    /// pair is closed. A pending (uncommitted) value at input close is
    /// dropped, not emitted.
    pub async fn run(mut self) {
        loop {
            // Wait for the first edit of a burst
            let Some(mut value) = self.input.recv().await else {
                return;
            };
            let mut deadline = Instant::now() + self.window;

            // Absorb further edits until the window elapses untouched
            loop {
                tokio::select! {
                    edit = self.input.recv() => match edit {
                        Some(next) => {
                            trace!("query edit resets debounce window");
                            value = next;
                            deadline = Instant::now() + self.window;
                        }
                        // Input closed with a timer pending: cancel, do not emit
                        None => return,
                    },
                    _ = sleep_until(deadline) => {
                        debug!(query = %value, "query committed");
                        if self.output.send(value).await.is_err() {
                            return;
                        }
                        break;
                    }
                }
            }
        }
    }
}
