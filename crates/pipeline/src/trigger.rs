//! Pagination trigger state machine
//!
//! Decides when a next-page fetch may be issued. The guard invariant: at
//! most one fetch in flight per search key at a time; proximity signals
//! while a fetch is pending are no-ops. Check and transition happen in one
//! call on the single event task, so there is no window between reading the
//! in-flight flag and setting it.

use catalog::{Cursor, Page};
use tracing::trace;

/// Trigger states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// No fetch in flight; a proximity signal may start one
    Idle,
    /// A page fetch is in flight
    AwaitingPage,
    /// Provider reported no further pages for this key
    Exhausted,
}

/// A fetch the trigger has authorized
///
/// Carries the continuation cursor to request (None = first page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    /// Cursor for the next page, if continuing
    pub cursor: Option<Cursor>,
}

/// Pagination trigger
///
/// Tracks the continuation cursor and in-flight state for the active key.
/// Reset on every key change.
#[derive(Debug)]
pub struct PageTrigger {
    state: TriggerState,
    cursor: Option<Cursor>,
    has_more: bool,
}

impl Default for PageTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTrigger {
    /// Create a trigger in the initial state
    pub fn new() -> Self {
        Self {
            state: TriggerState::Idle,
            cursor: None,
            has_more: true,
        }
    }

    /// Current state
    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Whether a fetch is currently in flight
    pub fn in_flight(&self) -> bool {
        self.state == TriggerState::AwaitingPage
    }

    /// Handle a proximity signal (or an initial-load request)
    ///
    /// Returns a `FetchPlan` when a fetch should be issued now. Returns
    /// `None` while a fetch is in flight or the key is exhausted; such
    /// signals are no-ops by design.
    pub fn request_fetch(&mut self) -> Option<FetchPlan> {
        match self.state {
            TriggerState::Idle if self.has_more => {
                self.state = TriggerState::AwaitingPage;
                Some(FetchPlan {
                    cursor: self.cursor.clone(),
                })
            }
            TriggerState::Idle => None,
            TriggerState::AwaitingPage => {
                trace!("proximity signal while fetch in flight, ignored");
                None
            }
            TriggerState::Exhausted => {
                trace!("proximity signal while exhausted, ignored");
                None
            }
        }
    }

    /// Handle a received page for the active key
    pub fn on_page(&mut self, page: &Page) {
        self.has_more = page.has_more;
        self.cursor = page.next_cursor.clone();
        self.state = if page.has_more {
            TriggerState::Idle
        } else {
            TriggerState::Exhausted
        };
    }

    /// Handle a fetch failure for the active key
    ///
    /// Returns to `Idle` (not `Exhausted`) so the next proximity signal
    /// retries; there is no automatic retry.
    pub fn on_failure(&mut self) {
        self.state = TriggerState::Idle;
    }

    /// Reset for a new key: cursor cleared, continuation assumed available
    pub fn reset(&mut self) {
        self.state = TriggerState::Idle;
        self.cursor = None;
        self.has_more = true;
    }
}
