//! Commerce data provider boundary
//!
//! The pipeline talks to exactly one external collaborator: an asynchronous
//! search provider returning pages of products. This crate provides:
//! - The `SearchProvider` trait and its error type
//! - Strict response normalization (one validated wire schema, no shape probing)
//! - An in-memory catalog provider for demos and tests

pub mod memory;
pub mod normalize;

use async_trait::async_trait;
use catalog::{Cursor, Filters, Page};
use thiserror::Error;

/// Errors surfaced by a search provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or backend failure; the request may be retried
    #[error("search request failed: {0}")]
    RequestFailed(String),

    /// Response arrived but did not match the wire schema
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Cursor was not minted by this provider or has expired
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),
}

/// Asynchronous product search provider
///
/// `search` returns one page of results for the given query and filters,
/// starting at `cursor` (None = first page), with at most `first` items.
/// Implementations must be cheap to share; the pipeline holds one behind an
/// `Arc` and issues at most one request at a time per listing.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch one page of search results
    async fn search(
        &self,
        query: &str,
        filters: &Filters,
        cursor: Option<&Cursor>,
        first: usize,
    ) -> Result<Page, ProviderError>;
}

// Re-exports
pub use memory::CatalogProvider;
pub use normalize::parse_page;
