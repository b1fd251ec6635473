//! Strict response normalization
//!
//! Vendor search backends are notorious for shape-shifting payloads (items
//! under `data.data`, `data`, or a named field depending on endpoint
//! version). Instead of probing alternative shapes at every call site, this
//! module accepts exactly one wire schema and rejects everything else at the
//! boundary:
//!
//! ```json
//! {
//!   "items": [
//!     { "id": "gid://1", "title": "Shirt",
//!       "price": { "amount": "25.00", "currencyCode": "USD" } }
//!   ],
//!   "hasMore": true,
//!   "nextCursor": "c1"
//! }
//! ```

use crate::ProviderError;
use catalog::{Cursor, Item, Page, Price};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WirePage {
    items: Vec<WireItem>,
    #[serde(rename = "hasMore")]
    has_more: bool,
    #[serde(rename = "nextCursor")]
    next_cursor: Option<String>,
}

#[derive(Deserialize)]
struct WireItem {
    id: String,
    title: String,
    price: WirePrice,
}

#[derive(Deserialize)]
struct WirePrice {
    amount: String,
    #[serde(rename = "currencyCode")]
    currency_code: String,
}

/// Parse and validate a raw provider response into a `Page`
///
/// Rejects unknown top-level fields, empty item ids, unparseable amounts,
/// and a continuation flag without a cursor.
pub fn parse_page(raw: &str) -> Result<Page, ProviderError> {
    let wire: WirePage = serde_json::from_str(raw)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    if wire.has_more && wire.next_cursor.is_none() {
        return Err(ProviderError::MalformedResponse(
            "hasMore set without nextCursor".to_string(),
        ));
    }

    let mut items = Vec::with_capacity(wire.items.len());
    for wi in wire.items {
        if wi.id.is_empty() {
            return Err(ProviderError::MalformedResponse(
                "item with empty id".to_string(),
            ));
        }
        let amount = parse_amount_minor(&wi.price.amount).ok_or_else(|| {
            ProviderError::MalformedResponse(format!(
                "unparseable price amount '{}' for item {}",
                wi.price.amount, wi.id
            ))
        })?;
        items.push(Item::new(
            wi.id,
            wi.title,
            Price::new(amount, wi.price.currency_code),
        ));
    }

    Ok(Page {
        items,
        has_more: wire.has_more,
        next_cursor: wire.next_cursor.map(Cursor::new),
    })
}

/// Parse a decimal amount string ("25.00", "9.9", "120") into minor units
fn parse_amount_minor(s: &str) -> Option<u64> {
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() || frac.len() > 2 {
        return None;
    }
    let whole: u64 = whole.parse().ok()?;
    let frac_minor = match frac.len() {
        0 => 0,
        1 => frac.parse::<u64>().ok()? * 10,
        2 => frac.parse::<u64>().ok()?,
        _ => unreachable!(),
    };
    whole.checked_mul(100)?.checked_add(frac_minor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_page() {
        let raw = r#"{
            "items": [
                {"id": "gid://1", "title": "Shirt", "price": {"amount": "25.00", "currencyCode": "USD"}},
                {"id": "gid://2", "title": "Hat", "price": {"amount": "9.9", "currencyCode": "USD"}}
            ],
            "hasMore": true,
            "nextCursor": "c1"
        }"#;

        let page = parse_page(raw).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].price.amount_minor, 2500);
        assert_eq!(page.items[1].price.amount_minor, 990);
        assert!(page.has_more);
        assert_eq!(page.next_cursor, Some(Cursor::new("c1")));
    }

    #[test]
    fn test_rejects_alternate_shapes() {
        // The "data.data" shape must not be probed into; it is malformed here.
        let raw = r#"{"data": {"data": {"items": [], "hasMore": false, "nextCursor": null}}}"#;
        assert!(matches!(
            parse_page(raw),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_rejects_has_more_without_cursor() {
        let raw = r#"{"items": [], "hasMore": true, "nextCursor": null}"#;
        assert!(matches!(
            parse_page(raw),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_rejects_empty_id() {
        let raw = r#"{
            "items": [{"id": "", "title": "x", "price": {"amount": "1.00", "currencyCode": "USD"}}],
            "hasMore": false,
            "nextCursor": null
        }"#;
        assert!(matches!(
            parse_page(raw),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_rejects_bad_amount() {
        let raw = r#"{
            "items": [{"id": "1", "title": "x", "price": {"amount": "25.123", "currencyCode": "USD"}}],
            "hasMore": false,
            "nextCursor": null
        }"#;
        assert!(matches!(
            parse_page(raw),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_amount_parsing() {
        assert_eq!(parse_amount_minor("25.00"), Some(2500));
        assert_eq!(parse_amount_minor("25"), Some(2500));
        assert_eq!(parse_amount_minor("9.9"), Some(990));
        assert_eq!(parse_amount_minor("0.05"), Some(5));
        assert_eq!(parse_amount_minor(""), None);
        assert_eq!(parse_amount_minor("."), None);
        assert_eq!(parse_amount_minor("1.2.3"), None);
        assert_eq!(parse_amount_minor("-1"), None);
    }
}
