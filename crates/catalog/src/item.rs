//! Product records

use serde::{Deserialize, Serialize};

/// A product price in minor units (cents) with its currency code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in minor units (e.g. 2500 = $25.00)
    pub amount_minor: u64,
    /// ISO 4217 currency code (e.g. "USD")
    pub currency: String,
}

impl Price {
    /// Create a new price
    pub fn new(amount_minor: u64, currency: impl Into<String>) -> Self {
        Self {
            amount_minor,
            currency: currency.into(),
        }
    }

    /// Format as a display string ("$25.00 USD" style without symbol lookup)
    pub fn display(&self) -> String {
        format!(
            "{}.{:02} {}",
            self.amount_minor / 100,
            self.amount_minor % 100,
            self.currency
        )
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A product record
///
/// Identity is the `id` field; everything else is opaque to the pipeline.
/// Deduplication in the result accumulator keys on `id` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable unique identifier
    pub id: String,
    /// Product title
    pub title: String,
    /// Product price
    pub price: Price,
}

impl Item {
    /// Create a new item
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new(2500, "USD").display(), "25.00 USD");
        assert_eq!(Price::new(99, "USD").display(), "0.99 USD");
        assert_eq!(Price::new(100000, "EUR").display(), "1000.00 EUR");
    }

    #[test]
    fn test_item_identity_is_id() {
        let a = Item::new("gid://1", "Shirt", Price::new(2500, "USD"));
        let b = Item::new("gid://1", "Shirt", Price::new(2500, "USD"));
        assert_eq!(a, b);
    }
}
