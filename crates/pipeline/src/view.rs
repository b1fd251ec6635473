//! Listing view model
//!
//! Pure mapping from pipeline state (trigger state, accumulated results,
//! filters, last failure) to a display model. The pipeline publishes a new
//! view after every state change; renderers never see intermediate state.

use crate::trigger::TriggerState;
use catalog::{Item, SearchKey};

/// Display phase of the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPhase {
    /// First page in flight, nothing accumulated yet
    Loading,
    /// Items visible, next page in flight
    LoadingMore,
    /// Nothing accumulated and not loading
    Empty,
    /// Items visible, more pages may be available
    Ready,
    /// Items visible, provider reported no further pages
    Exhausted,
}

/// Snapshot of the listing for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    /// The key these results belong to
    pub key: SearchKey,
    /// Accumulated items, display order
    pub items: Vec<Item>,
    /// Display phase
    pub phase: ListingPhase,
    /// Transient failure notice; never clears existing items
    pub notice: Option<String>,
}

impl ListingView {
    /// The view before any input has been processed
    pub fn initial() -> Self {
        Self {
            key: SearchKey::default(),
            items: Vec::new(),
            phase: ListingPhase::Empty,
            notice: None,
        }
    }

    /// Compose a view from pipeline state
    pub fn compose(
        key: SearchKey,
        items: Vec<Item>,
        trigger: TriggerState,
        notice: Option<String>,
    ) -> Self {
        let phase = match (items.is_empty(), trigger) {
            (true, TriggerState::AwaitingPage) => ListingPhase::Loading,
            (true, _) => ListingPhase::Empty,
            (false, TriggerState::AwaitingPage) => ListingPhase::LoadingMore,
            (false, TriggerState::Idle) => ListingPhase::Ready,
            (false, TriggerState::Exhausted) => ListingPhase::Exhausted,
        };
        Self {
            key,
            items,
            phase,
            notice,
        }
    }

    /// Whether any fetch is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ListingPhase::Loading | ListingPhase::LoadingMore)
    }

    /// Number of accumulated results
    pub fn result_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the empty state should mention active filters
    pub fn has_active_filters(&self) -> bool {
        !self.key.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Filters, Item, Price};

    fn item(id: &str) -> Item {
        Item::new(id, "X", Price::new(100, "USD"))
    }

    fn key() -> SearchKey {
        SearchKey::new("shirt", Filters::none())
    }

    #[test]
    fn test_phase_mapping() {
        let view = ListingView::compose(key(), vec![], TriggerState::AwaitingPage, None);
        assert_eq!(view.phase, ListingPhase::Loading);
        assert!(view.is_loading());

        let view = ListingView::compose(key(), vec![], TriggerState::Idle, None);
        assert_eq!(view.phase, ListingPhase::Empty);

        let view = ListingView::compose(key(), vec![], TriggerState::Exhausted, None);
        assert_eq!(view.phase, ListingPhase::Empty);

        let view = ListingView::compose(key(), vec![item("a")], TriggerState::AwaitingPage, None);
        assert_eq!(view.phase, ListingPhase::LoadingMore);

        let view = ListingView::compose(key(), vec![item("a")], TriggerState::Idle, None);
        assert_eq!(view.phase, ListingPhase::Ready);

        let view = ListingView::compose(key(), vec![item("a")], TriggerState::Exhausted, None);
        assert_eq!(view.phase, ListingPhase::Exhausted);
    }

    #[test]
    fn test_notice_rides_along_without_hiding_items() {
        let view = ListingView::compose(
            key(),
            vec![item("a")],
            TriggerState::Idle,
            Some("search request failed".to_string()),
        );
        assert_eq!(view.phase, ListingPhase::Ready);
        assert_eq!(view.result_count(), 1);
        assert!(view.notice.is_some());
    }
}
