//! Filter values for product listings
//!
//! Filters are pure values with structural equality. Change detection in the
//! pipeline compares old and new Filters directly, so every mutation helper
//! here returns a new value instead of mutating in place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised at the filter boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// Price range with min above max
    #[error("invalid price range: min {min} exceeds max {max}")]
    InvalidPriceRange { min: u64, max: u64 },
}

/// Color tags supported by the product search filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Black,
    White,
    Grey,
    Blue,
    Red,
    Green,
    Yellow,
    Orange,
    Pink,
    Purple,
    Brown,
    Beige,
    Navy,
    Gold,
    Silver,
}

impl Color {
    /// All selectable colors, in display order
    pub const ALL: [Color; 15] = [
        Color::Black,
        Color::White,
        Color::Grey,
        Color::Blue,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Pink,
        Color::Purple,
        Color::Brown,
        Color::Beige,
        Color::Navy,
        Color::Gold,
        Color::Silver,
    ];

    /// Display name ("Black", "Navy", ...)
    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
            Color::Grey => "Grey",
            Color::Blue => "Blue",
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Orange => "Orange",
            Color::Pink => "Pink",
            Color::Purple => "Purple",
            Color::Brown => "Brown",
            Color::Beige => "Beige",
            Color::Navy => "Navy",
            Color::Gold => "Gold",
            Color::Silver => "Silver",
        }
    }

    /// Parse from a case-insensitive name
    pub fn parse(s: &str) -> Option<Color> {
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A price range filter in minor units
///
/// Either bound may be absent. Construction enforces min <= max when both
/// bounds are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound (inclusive), minor units
    pub min: Option<u64>,
    /// Upper bound (inclusive), minor units
    pub max: Option<u64>,
}

impl PriceRange {
    /// Create a validated price range
    pub fn new(min: Option<u64>, max: Option<u64>) -> Result<Self, FilterError> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(FilterError::InvalidPriceRange { min: lo, max: hi });
            }
        }
        Ok(Self { min, max })
    }

    /// The preset ranges offered by the listing UI
    ///
    /// (label, range) pairs matching the demo storefront presets.
    pub fn presets() -> Vec<(&'static str, PriceRange)> {
        vec![
            ("Under $25", PriceRange { min: Some(0), max: Some(2500) }),
            ("$25 - $50", PriceRange { min: Some(2500), max: Some(5000) }),
            ("$50 - $100", PriceRange { min: Some(5000), max: Some(10000) }),
            ("$100 - $200", PriceRange { min: Some(10000), max: Some(20000) }),
            ("Over $200", PriceRange { min: Some(20000), max: None }),
        ]
    }

    /// Check whether an amount falls inside the range
    pub fn contains(&self, amount_minor: u64) -> bool {
        if let Some(lo) = self.min {
            if amount_minor < lo {
                return false;
            }
        }
        if let Some(hi) = self.max {
            if amount_minor > hi {
                return false;
            }
        }
        true
    }
}

/// Active filter selection: a set of color tags plus an optional price range
///
/// Colors are kept sorted so that equality and display are independent of
/// toggle order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    /// Selected colors (sorted, no duplicates)
    pub colors: Vec<Color>,
    /// Active price range, if any
    pub price: Option<PriceRange>,
}

impl Filters {
    /// Empty filter selection
    pub fn none() -> Self {
        Self::default()
    }

    /// True when no filter is active
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.price.is_none()
    }

    /// Number of active filters (each color counts, price counts once)
    pub fn active_count(&self) -> usize {
        self.colors.len() + usize::from(self.price.is_some())
    }

    /// Return a copy with the given color toggled
    ///
    /// A present color is removed; an absent one is added.
    pub fn with_color_toggled(&self, color: Color) -> Self {
        let mut next = self.clone();
        match next.colors.binary_search(&color) {
            Ok(idx) => {
                next.colors.remove(idx);
            }
            Err(idx) => {
                next.colors.insert(idx, color);
            }
        }
        next
    }

    /// Return a copy with the price range toggled
    ///
    /// Setting the currently active range clears it; any other range replaces
    /// the active one.
    pub fn with_price_range(&self, range: PriceRange) -> Self {
        let mut next = self.clone();
        next.price = if next.price == Some(range) {
            None
        } else {
            Some(range)
        };
        next
    }

    /// Check whether an item passes the active filters
    pub fn matches(&self, item_colors: &[Color], amount_minor: u64) -> bool {
        if !self.colors.is_empty() && !self.colors.iter().any(|c| item_colors.contains(c)) {
            return false;
        }
        if let Some(range) = &self.price {
            if !range.contains(amount_minor) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_rejects_inverted_bounds() {
        let err = PriceRange::new(Some(5000), Some(2500)).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidPriceRange {
                min: 5000,
                max: 2500
            }
        );
    }

    #[test]
    fn test_price_range_open_bounds() {
        assert!(PriceRange::new(None, Some(2500)).is_ok());
        assert!(PriceRange::new(Some(2500), None).is_ok());
        assert!(PriceRange::new(None, None).is_ok());
    }

    #[test]
    fn test_price_range_contains() {
        let range = PriceRange::new(Some(2500), Some(5000)).unwrap();
        assert!(!range.contains(2499));
        assert!(range.contains(2500));
        assert!(range.contains(5000));
        assert!(!range.contains(5001));

        let open = PriceRange::new(Some(20000), None).unwrap();
        assert!(open.contains(u64::MAX));
    }

    #[test]
    fn test_color_toggle() {
        let filters = Filters::none().with_color_toggled(Color::Blue);
        assert_eq!(filters.colors, vec![Color::Blue]);

        let filters = filters.with_color_toggled(Color::Blue);
        assert!(filters.colors.is_empty());
    }

    #[test]
    fn test_color_order_does_not_affect_equality() {
        let a = Filters::none()
            .with_color_toggled(Color::Red)
            .with_color_toggled(Color::Blue);
        let b = Filters::none()
            .with_color_toggled(Color::Blue)
            .with_color_toggled(Color::Red);
        assert_eq!(a, b);
    }

    #[test]
    fn test_price_toggle_semantics() {
        let range = PriceRange::new(Some(0), Some(2500)).unwrap();
        let filters = Filters::none().with_price_range(range);
        assert_eq!(filters.price, Some(range));

        // Same range again clears it
        let filters = filters.with_price_range(range);
        assert_eq!(filters.price, None);

        // Different range replaces
        let other = PriceRange::new(Some(2500), Some(5000)).unwrap();
        let filters = Filters::none().with_price_range(range).with_price_range(other);
        assert_eq!(filters.price, Some(other));
    }

    #[test]
    fn test_active_count() {
        let range = PriceRange::new(Some(0), Some(2500)).unwrap();
        let filters = Filters::none()
            .with_color_toggled(Color::Red)
            .with_color_toggled(Color::Blue)
            .with_price_range(range);
        assert_eq!(filters.active_count(), 3);
        assert!(!filters.is_empty());
        assert!(Filters::none().is_empty());
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("navy"), Some(Color::Navy));
        assert_eq!(Color::parse("NAVY"), Some(Color::Navy));
        assert_eq!(Color::parse("mauve"), None);
    }
}
