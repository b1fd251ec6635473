//! Search key: the (query, filters) identity of one listing generation

use crate::Filters;
use serde::{Deserialize, Serialize};

/// Identity of one listing generation
///
/// Every reset of the pipeline replaces the active key. Fetch completions are
/// tagged with the key they were issued under; a completion whose key no
/// longer matches the active one is stale and must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchKey {
    /// Free-text query (possibly empty)
    pub query: String,
    /// Active filter selection
    pub filters: Filters,
}

impl SearchKey {
    /// Create a new key
    pub fn new(query: impl Into<String>, filters: Filters) -> Self {
        Self {
            query: query.into(),
            filters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_key_equality_is_structural() {
        let a = SearchKey::new("shirt", Filters::none().with_color_toggled(Color::Blue));
        let b = SearchKey::new("shirt", Filters::none().with_color_toggled(Color::Blue));
        let c = SearchKey::new("shirt", Filters::none());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
