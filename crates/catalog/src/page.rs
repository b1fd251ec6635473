//! Fetched page and continuation types

use crate::Item;
use serde::{Deserialize, Serialize};

/// Opaque continuation token for requesting the next page
///
/// The pipeline never inspects the token; it is round-tripped back to the
/// provider verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a provider token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One batch of fetched items plus continuation metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Items in this page, provider order
    pub items: Vec<Item>,
    /// Whether further pages exist
    pub has_more: bool,
    /// Token for the next page (present when `has_more`)
    pub next_cursor: Option<Cursor>,
}

impl Page {
    /// A terminal page with the given items and no continuation
    pub fn last(items: Vec<Item>) -> Self {
        Self {
            items,
            has_more: false,
            next_cursor: None,
        }
    }

    /// A page with more to come
    pub fn continued(items: Vec<Item>, next_cursor: Cursor) -> Self {
        Self {
            items,
            has_more: true,
            next_cursor: Some(next_cursor),
        }
    }
}
