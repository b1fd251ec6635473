//! In-memory catalog provider
//!
//! Deterministic stand-in for the vendor search backend. Backs the CLI demo
//! and the pipeline integration tests. Matching is case-insensitive substring
//! on the title; paging uses an offset cursor minted by this provider.

use crate::{ProviderError, SearchProvider};
use async_trait::async_trait;
use catalog::{Color, Cursor, Filters, Item, Page, Price};
use serde::Deserialize;
use tracing::debug;

/// One product in the backing catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
    /// Stable identifier
    pub id: String,
    /// Title, used for query matching
    pub title: String,
    /// Price in minor units
    pub price_minor: u64,
    /// Currency code
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Color tags for filter matching
    #[serde(default)]
    pub colors: Vec<Color>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// In-memory search provider over a fixed product catalog
pub struct CatalogProvider {
    products: Vec<CatalogProduct>,
}

impl CatalogProvider {
    /// Create a provider over the given products
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self { products }
    }

    /// Load a catalog from a JSON array of products
    pub fn from_json(raw: &str) -> Result<Self, ProviderError> {
        let products: Vec<CatalogProduct> = serde_json::from_str(raw)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        Ok(Self::new(products))
    }

    /// Number of products in the catalog
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn matches(&self, product: &CatalogProduct, query: &str, filters: &Filters) -> bool {
        if !query.is_empty()
            && !product.title.to_lowercase().contains(&query.to_lowercase())
        {
            return false;
        }
        filters.matches(&product.colors, product.price_minor)
    }

    fn decode_offset(cursor: Option<&Cursor>) -> Result<usize, ProviderError> {
        match cursor {
            None => Ok(0),
            Some(c) => c
                .as_str()
                .strip_prefix("o:")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| ProviderError::InvalidCursor(c.as_str().to_string())),
        }
    }
}

#[async_trait]
impl SearchProvider for CatalogProvider {
    async fn search(
        &self,
        query: &str,
        filters: &Filters,
        cursor: Option<&Cursor>,
        first: usize,
    ) -> Result<Page, ProviderError> {
        let offset = Self::decode_offset(cursor)?;

        let matching: Vec<&CatalogProduct> = self
            .products
            .iter()
            .filter(|p| self.matches(p, query, filters))
            .collect();

        let end = (offset + first).min(matching.len());
        let items: Vec<Item> = matching
            .get(offset..end)
            .unwrap_or(&[])
            .iter()
            .map(|p| Item::new(&p.id, &p.title, Price::new(p.price_minor, &p.currency)))
            .collect();

        let has_more = end < matching.len();
        debug!(
            query,
            offset,
            returned = items.len(),
            total = matching.len(),
            has_more,
            "catalog search"
        );

        Ok(Page {
            items,
            has_more,
            next_cursor: has_more.then(|| Cursor::new(format!("o:{end}"))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CatalogProvider {
        CatalogProvider::new(vec![
            CatalogProduct {
                id: "p1".into(),
                title: "Blue Shirt".into(),
                price_minor: 2500,
                currency: "USD".into(),
                colors: vec![Color::Blue],
            },
            CatalogProduct {
                id: "p2".into(),
                title: "Red Shirt".into(),
                price_minor: 3500,
                currency: "USD".into(),
                colors: vec![Color::Red],
            },
            CatalogProduct {
                id: "p3".into(),
                title: "Wool Hat".into(),
                price_minor: 1500,
                currency: "USD".into(),
                colors: vec![Color::Grey],
            },
        ])
    }

    #[tokio::test]
    async fn test_query_substring_match() {
        let provider = sample();
        let page = provider
            .search("shirt", &Filters::none(), None, 20)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_paging_with_cursor() {
        let provider = sample();
        let page1 = provider.search("", &Filters::none(), None, 2).await.unwrap();
        assert_eq!(page1.items.len(), 2);
        assert!(page1.has_more);

        let page2 = provider
            .search("", &Filters::none(), page1.next_cursor.as_ref(), 2)
            .await
            .unwrap();
        assert_eq!(page2.items.len(), 1);
        assert!(!page2.has_more);
        assert!(page2.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_color_and_price_filters() {
        let provider = sample();
        let filters = Filters::none().with_color_toggled(Color::Red);
        let page = provider.search("shirt", &filters, None, 20).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "p2");

        let filters = Filters::none()
            .with_price_range(catalog::PriceRange::new(Some(0), Some(2000)).unwrap());
        let page = provider.search("", &filters, None, 20).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "p3");
    }

    #[tokio::test]
    async fn test_invalid_cursor_rejected() {
        let provider = sample();
        let bad = Cursor::new("garbage");
        let err = provider
            .search("", &Filters::none(), Some(&bad), 20)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidCursor(_)));
    }

    #[test]
    fn test_from_json() {
        let raw = r#"[
            {"id": "p1", "title": "Blue Shirt", "price_minor": 2500, "colors": ["BLUE"]}
        ]"#;
        let provider = CatalogProvider::from_json(raw).unwrap();
        assert_eq!(provider.len(), 1);
    }
}
