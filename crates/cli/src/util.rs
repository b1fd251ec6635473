//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use catalog::{Color, Item};
use owo_colors::OwoColorize;
use pipeline::{ListingPhase, ListingView};
use provider::CatalogProvider;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

use crate::sample;

/// Parse color names given on the command line
pub fn parse_colors(names: &[String]) -> Result<Vec<Color>> {
    names
        .iter()
        .map(|name| {
            Color::parse(name).with_context(|| {
                format!(
                    "unknown color '{}'. Available: {}",
                    name,
                    Color::ALL
                        .iter()
                        .map(Color::name)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
        })
        .collect()
}

/// Build the catalog provider, from a file or the built-in sample
pub fn load_provider(catalog: Option<PathBuf>) -> Result<CatalogProvider> {
    match catalog {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
            let provider = CatalogProvider::from_json(&raw)
                .with_context(|| format!("failed to parse catalog file: {}", path.display()))?;
            debug!(path = %path.display(), products = provider.len(), "loaded catalog file");
            Ok(provider)
        }
        None => {
            let provider = CatalogProvider::new(sample::sample_catalog());
            debug!(products = provider.len(), "using built-in sample catalog");
            Ok(provider)
        }
    }
}

/// Wait until the pipeline settles on a view the caller expects
///
/// Waits for publications newer than the last one seen, then for a view that
/// is not loading and passes `expect`. The predicate pins the search key so a
/// snapshot published before a just-sent command was processed is never
/// mistaken for the settled result.
pub async fn settle(
    views: &mut watch::Receiver<ListingView>,
    expect: impl Fn(&ListingView) -> bool,
) -> Result<ListingView> {
    let view = tokio::time::timeout(Duration::from_secs(30), async {
        loop {
            views.changed().await.context("pipeline stopped")?;
            let view = views.borrow_and_update().clone();
            if !view.is_loading() && expect(&view) {
                return Ok::<_, anyhow::Error>(view);
            }
        }
    })
    .await
    .context("timed out waiting for results")??;
    Ok(view)
}

/// Print items appended since the last render; returns the new printed count
pub fn print_new_items(items: &[Item], already_printed: usize) -> usize {
    for (idx, item) in items.iter().enumerate().skip(already_printed) {
        println!(
            "{:>4}. {:<40} {:>12}  {}",
            idx + 1,
            item.title,
            item.price.display().green(),
            item.id.dimmed()
        );
    }
    items.len()
}

/// Print the listing footer: count, exhaustion, notices
pub fn print_footer(view: &ListingView) {
    if let Some(notice) = &view.notice {
        println!("{} {}", "!".yellow().bold(), notice.yellow());
    }
    match view.phase {
        ListingPhase::Empty => {
            if view.key.query.is_empty() && !view.has_active_filters() {
                println!("{}", "No products available".dimmed());
            } else if view.has_active_filters() {
                println!(
                    "No products found for \"{}\" with the active filters",
                    view.key.query
                );
            } else {
                println!("No products found for \"{}\"", view.key.query);
            }
        }
        ListingPhase::Exhausted => {
            println!(
                "{} results for \"{}\" {}",
                view.result_count().to_string().bold(),
                view.key.query,
                "(end of results)".dimmed()
            );
        }
        _ => {
            println!(
                "{} results for \"{}\"",
                view.result_count().to_string().bold(),
                view.key.query
            );
        }
    }
}

/// One-line summary of active filters
pub fn filters_summary(view: &ListingView) -> String {
    let filters = &view.key.filters;
    if filters.is_empty() {
        return "none".to_string();
    }
    let mut parts: Vec<String> = filters.colors.iter().map(|c| c.name().to_string()).collect();
    if let Some(price) = &filters.price {
        let min = price.min.map_or("".to_string(), |v| format!("{}", v / 100));
        let max = price.max.map_or("".to_string(), |v| format!("{}", v / 100));
        parts.push(format!("${min}-${max}"));
    }
    parts.join(", ")
}
