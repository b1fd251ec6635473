//! Result accumulation
//!
//! Merges successive pages of fetched results into a deduplicated,
//! order-preserving list for the active search key. Pages tagged with a
//! superseded key are discarded silently; that stale-key check is the
//! pipeline's one consistency guarantee and holds no matter how many reset
//! cycles have passed since the page's fetch was issued.

use ahash::AHashSet;
use catalog::{Item, Page, SearchKey};
use tracing::debug;

/// Accumulated, deduplicated results for the active (query, filters) key
///
/// Invariant: no item id appears twice; first occurrence wins and insertion
/// order is preserved. Items are appended in fetch-completion order — the
/// accumulator never reorders, it only deduplicates and appends.
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    key: SearchKey,
    items: Vec<Item>,
    seen_ids: AHashSet<String>,
}

impl ResultAccumulator {
    /// Create an empty accumulator for the default (empty) key
    pub fn new() -> Self {
        Self::default()
    }

    /// The active key
    pub fn key(&self) -> &SearchKey {
        &self.key
    }

    /// Accumulated items, insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of accumulated items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been accumulated
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the active key and clear all accumulated state
    ///
    /// Must be called once per distinct key before any page is ingested
    /// for it.
    pub fn reset(&mut self, key: SearchKey) {
        self.key = key;
        self.items.clear();
        self.seen_ids.clear();
    }

    /// Ingest one fetched page
    ///
    /// Returns `Some(appended)` with the number of newly appended items, or
    /// `None` when `for_key` no longer matches the active key (the page is
    /// stale and the accumulator is left untouched).
    pub fn ingest_page(&mut self, page: Page, for_key: &SearchKey) -> Option<usize> {
        if *for_key != self.key {
            debug!(
                stale_query = %for_key.query,
                active_query = %self.key.query,
                "discarding stale page"
            );
            return None;
        }

        let mut appended = 0;
        for item in page.items {
            if self.seen_ids.insert(item.id.clone()) {
                self.items.push(item);
                appended += 1;
            }
        }
        Some(appended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Filters, Price};

    fn item(id: &str) -> Item {
        Item::new(id, format!("Item {id}"), Price::new(1000, "USD"))
    }

    fn key(query: &str) -> SearchKey {
        SearchKey::new(query, Filters::none())
    }

    fn ids(acc: &ResultAccumulator) -> Vec<&str> {
        acc.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_overlapping_pages_deduplicate() {
        let mut acc = ResultAccumulator::new();
        acc.reset(key("shirt"));

        let appended = acc
            .ingest_page(Page::continued(vec![item("a"), item("b")], catalog::Cursor::new("c1")), &key("shirt"))
            .unwrap();
        assert_eq!(appended, 2);

        let appended = acc
            .ingest_page(Page::last(vec![item("b"), item("c")]), &key("shirt"))
            .unwrap();
        assert_eq!(appended, 1);

        assert_eq!(ids(&acc), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_stale_key_is_a_no_op() {
        let mut acc = ResultAccumulator::new();
        acc.reset(key("shirt"));
        acc.ingest_page(Page::last(vec![item("a")]), &key("shirt"))
            .unwrap();

        // Reset supersedes "shirt"; a late page for it must not mutate
        acc.reset(key("hat"));
        assert!(acc
            .ingest_page(Page::last(vec![item("z")]), &key("shirt"))
            .is_none());
        assert!(acc.is_empty());

        // Even after several more reset cycles
        acc.reset(key("sock"));
        acc.reset(key("hat"));
        assert!(acc
            .ingest_page(Page::last(vec![item("z")]), &key("shirt"))
            .is_none());
        assert!(acc.is_empty());
    }

    #[test]
    fn test_duplicate_page_delivery_is_idempotent() {
        let mut acc = ResultAccumulator::new();
        acc.reset(key("shirt"));

        let page = Page::last(vec![item("a"), item("b")]);
        acc.ingest_page(page.clone(), &key("shirt")).unwrap();
        let appended = acc.ingest_page(page, &key("shirt")).unwrap();

        assert_eq!(appended, 0);
        assert_eq!(ids(&acc), vec!["a", "b"]);
    }

    #[test]
    fn test_ingestion_order_is_completion_order() {
        let mut acc = ResultAccumulator::new();
        acc.reset(key("shirt"));

        // A later request resolving first is ingested first; no reordering
        acc.ingest_page(Page::last(vec![item("c"), item("d")]), &key("shirt"))
            .unwrap();
        acc.ingest_page(Page::last(vec![item("a"), item("b")]), &key("shirt"))
            .unwrap();

        assert_eq!(ids(&acc), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_reset_clears_dedup_memory() {
        let mut acc = ResultAccumulator::new();
        acc.reset(key("shirt"));
        acc.ingest_page(Page::last(vec![item("a")]), &key("shirt"))
            .unwrap();

        acc.reset(key("shirt jacket"));
        let appended = acc
            .ingest_page(Page::last(vec![item("a")]), &key("shirt jacket"))
            .unwrap();
        assert_eq!(appended, 1);
        assert_eq!(ids(&acc), vec!["a"]);
    }
}
