//! Built-in sample catalog
//!
//! Deterministic product set used when no catalog file is given, sized so
//! that common queries span several pages at the default page size.

use catalog::Color;
use provider::memory::CatalogProduct;

const APPAREL: &[(&str, u64)] = &[
    ("Shirt", 2500),
    ("T-Shirt", 1900),
    ("Hoodie", 4500),
    ("Jacket", 12000),
    ("Hat", 1500),
    ("Scarf", 2200),
    ("Socks", 900),
    ("Sneakers", 8900),
];

const GOODS: &[(&str, u64)] = &[
    ("Backpack", 6500),
    ("Tote Bag", 3200),
    ("Water Bottle", 1800),
    ("Mug", 1400),
    ("Notebook", 1100),
    ("Phone Case", 2400),
];

const PALETTE: &[Color] = &[
    Color::Black,
    Color::White,
    Color::Navy,
    Color::Blue,
    Color::Red,
    Color::Green,
    Color::Beige,
];

/// Build the sample catalog (~90 products)
pub fn sample_catalog() -> Vec<CatalogProduct> {
    let mut products = Vec::new();
    let mut serial = 0usize;

    for (noun, base_price) in APPAREL {
        for color in PALETTE {
            serial += 1;
            // Spread prices so every preset range has members
            let price_minor = base_price + (serial as u64 % 5) * 700;
            products.push(CatalogProduct {
                id: format!("gid://shopfeed/p{serial}"),
                title: format!("{} {}", color.name(), noun),
                price_minor,
                currency: "USD".to_string(),
                colors: vec![*color],
            });
        }
    }

    for (noun, base_price) in GOODS {
        for color in &PALETTE[..4] {
            serial += 1;
            let price_minor = base_price + (serial as u64 % 3) * 450;
            products.push(CatalogProduct {
                id: format!("gid://shopfeed/p{serial}"),
                title: format!("{} {}", color.name(), noun),
                price_minor,
                currency: "USD".to_string(),
                colors: vec![*color],
            });
        }
    }

    products
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_ids_are_unique() {
        let products = sample_catalog();
        let mut ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
        assert!(before > 60);
    }

    #[test]
    fn test_catalog_spans_multiple_default_pages() {
        // The demo scrolls an unfiltered listing; it needs several pages at
        // the default page size of 20
        let products = sample_catalog();
        assert!(products.len() > 60);

        let shirts = products
            .iter()
            .filter(|p| p.title.to_lowercase().contains("shirt"))
            .count();
        assert!(shirts >= 14);
    }
}
