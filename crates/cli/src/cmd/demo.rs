//! Scripted browsing session
//!
//! Walks through the full pipeline behavior against the sample catalog with
//! simulated network latency: typing with debounce, infinite scroll, filter
//! toggles, and the reset semantics they trigger.

use anyhow::Result;
use async_trait::async_trait;
use catalog::{Color, Cursor, Filters, Page, PriceRange};
use owo_colors::OwoColorize;
use pipeline::{ListingPhase, ListingPipeline, ListingView};
use provider::{ProviderError, SearchProvider};
use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::system_config;
use crate::util;

/// Provider wrapper that adds simulated network latency with jitter
struct JitterProvider {
    inner: Arc<dyn SearchProvider>,
    base: Duration,
    jitter: Duration,
}

#[async_trait]
impl SearchProvider for JitterProvider {
    async fn search(
        &self,
        query: &str,
        filters: &Filters,
        cursor: Option<&Cursor>,
        first: usize,
    ) -> Result<Page, ProviderError> {
        let jitter_ms = if self.jitter.is_zero() {
            0
        } else {
            rand::thread_rng().gen_range(0..=self.jitter.as_millis() as u64)
        };
        tokio::time::sleep(self.base + Duration::from_millis(jitter_ms)).await;
        self.inner.search(query, filters, cursor, first).await
    }
}

/// Run the scripted session
pub async fn run(catalog: Option<PathBuf>) -> Result<()> {
    let config = system_config::load()?;
    let provider = Arc::new(JitterProvider {
        inner: Arc::new(util::load_provider(catalog)?),
        base: Duration::from_millis(config.demo.latency_ms),
        jitter: Duration::from_millis(config.demo.jitter_ms),
    });

    let handle = ListingPipeline::spawn(provider, config.pipeline.clone())?;
    let mut views = handle.subscribe();

    // 1. Typing: one character at a time; only one committed query results
    section("Typing \"shirt\" one keystroke at a time (debounced)");
    type_query(
        &handle,
        "shirt",
        config.demo.typing_delay_ms,
        config.pipeline.debounce_ms,
    )
    .await?;
    let on_query = |v: &ListingView| v.key.query == "shirt" && v.key.filters.is_empty();
    let view = util::settle(&mut views, on_query).await?;
    println!(
        "committed query: \"{}\" ({} results on page one)",
        view.key.query.bold(),
        view.result_count()
    );
    let mut printed = util::print_new_items(&view.items, 0);

    // 2. Infinite scroll until the provider reports no further pages
    section("Scrolling to the end of the results");
    let mut view = view;
    while view.phase == ListingPhase::Ready {
        handle.load_more().await?;
        view = util::settle(&mut views, on_query).await?;
        printed = util::print_new_items(&view.items, printed);
    }
    util::print_footer(&view);

    // 3. Color filter: resets the listing, drops superseded results
    section("Toggling the Blue color filter");
    handle.toggle_color(Color::Blue).await?;
    let view = util::settle(&mut views, |v: &ListingView| {
        v.key.filters.colors == [Color::Blue] && v.key.filters.price.is_none()
    })
    .await?;
    util::print_new_items(&view.items, 0);
    util::print_footer(&view);

    // 4. Price preset on top of the color filter
    let presets = PriceRange::presets();
    let (label, range) = &presets[1];
    section(&format!("Adding price preset {label}"));
    handle.set_price_range(range.min, range.max).await?;
    let view = util::settle(&mut views, |v: &ListingView| v.key.filters.price.is_some()).await?;
    util::print_new_items(&view.items, 0);
    util::print_footer(&view);

    // 5. Clear everything: back to the full listing
    section("Clearing filters and query");
    handle.clear_filters().await?;
    handle.submit_query("").await?;
    let view = util::settle(&mut views, |v: &ListingView| {
        v.key.query.is_empty() && v.key.filters.is_empty()
    })
    .await?;
    println!(
        "{} products on the first unfiltered page",
        view.result_count().to_string().bold()
    );

    handle.shutdown().await.ok();
    Ok(())
}

async fn type_query(
    handle: &pipeline::PipelineHandle,
    query: &str,
    typing_delay_ms: u64,
    debounce_ms: u64,
) -> Result<()> {
    for end in 1..=query.len() {
        handle.edit_query(&query[..end]).await?;
        tokio::time::sleep(Duration::from_millis(typing_delay_ms)).await;
    }
    // Let the debounce window elapse so the commit has fired
    tokio::time::sleep(Duration::from_millis(debounce_ms + 100)).await;
    Ok(())
}

fn section(title: &str) {
    println!("\n{} {}", ">".cyan().bold(), title.bold());
}
