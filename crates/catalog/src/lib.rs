//! Product data model for Shopfeed
//!
//! This crate provides the value types shared by the listing pipeline:
//! - Item/Price product records
//! - Filter values (color tags, price ranges) with toggle semantics
//! - Page/Cursor continuation types
//! - SearchKey (query + filters) identity for staleness checks

pub mod filters;
pub mod item;
pub mod key;
pub mod page;

// Re-exports
pub use filters::{Color, FilterError, Filters, PriceRange};
pub use item::{Item, Price};
pub use key::SearchKey;
pub use page::{Cursor, Page};
