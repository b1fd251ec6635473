//! One-shot paged search command

use anyhow::{ensure, Context, Result};
use catalog::{Filters, PriceRange};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use pipeline::{ListingPhase, ListingPipeline, ListingView};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::system_config;
use crate::util;

/// Run a search, paging through results until exhausted (or a page limit)
pub async fn run(
    query: &str,
    colors: &[String],
    min: Option<u64>,
    max: Option<u64>,
    preset: Option<usize>,
    catalog: Option<PathBuf>,
    pages: Option<usize>,
) -> Result<()> {
    let config = system_config::load()?;
    let colors = util::parse_colors(colors)?;

    // Validate the price selection up front so a bad range is a CLI error,
    // not a silently retained prior state
    let price = match preset {
        Some(n) => {
            let presets = PriceRange::presets();
            ensure!(
                (1..=presets.len()).contains(&n),
                "preset must be 1-{}",
                presets.len()
            );
            Some(presets[n - 1].1)
        }
        None if min.is_some() || max.is_some() => {
            Some(PriceRange::new(min, max).context("invalid price range")?)
        }
        None => None,
    };

    // The key the pipeline will settle on once every command has applied
    let mut expected = Filters::none();
    for color in &colors {
        expected = expected.with_color_toggled(*color);
    }
    if let Some(range) = price {
        expected = expected.with_price_range(range);
    }
    let settled = |v: &ListingView| v.key.query == query && v.key.filters == expected;

    let provider = Arc::new(util::load_provider(catalog)?);
    let handle = ListingPipeline::spawn(provider, config.pipeline)?;
    let mut views = handle.subscribe();

    for color in &colors {
        handle.toggle_color(*color).await?;
    }
    if let Some(range) = price {
        handle.set_price_range(range.min, range.max).await?;
    }
    handle.submit_query(query).await?;

    let spinner = searching_spinner(query);
    let mut view = util::settle(&mut views, &settled).await?;
    spinner.finish_and_clear();

    println!(
        "{} \"{}\"  {} {}",
        "Search:".bold(),
        query,
        "filters:".dimmed(),
        util::filters_summary(&view).dimmed()
    );

    let mut printed = util::print_new_items(&view.items, 0);
    let mut fetched_pages = 1usize;
    let page_limit = pages.unwrap_or(usize::MAX);

    while view.phase == ListingPhase::Ready && fetched_pages < page_limit {
        handle.load_more().await?;
        let spinner = loading_spinner();
        view = util::settle(&mut views, &settled).await?;
        spinner.finish_and_clear();
        printed = util::print_new_items(&view.items, printed);
        fetched_pages += 1;
    }

    util::print_footer(&view);
    handle.shutdown().await.ok();
    Ok(())
}

fn searching_spinner(query: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Searching for \"{query}\"..."));
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn loading_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Loading more...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
