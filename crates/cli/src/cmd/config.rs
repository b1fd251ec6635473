//! Configuration inspection command

use anyhow::Result;
use owo_colors::OwoColorize;
use pipeline::PipelineConfig;

use crate::system_config;

/// Show configuration (defaults to --list when no flag is given)
pub async fn run(_list: bool, path: bool, example: bool) -> Result<()> {
    if example {
        print!("{}", system_config::example_config());
        return Ok(());
    }

    if path {
        match system_config::config_file_path() {
            Some(p) if p.exists() => println!("{}", p.display()),
            Some(p) => {
                println!("{}", p.display());
                println!("{}", "File does not exist; defaults are in effect.".yellow());
            }
            None => println!("{}", "Could not determine config directory".yellow()),
        }
        return Ok(());
    }

    // --list is the default view
    let config = system_config::load()?;

    println!("{}", "Shopfeed Configuration".bold());

    println!("\n{}", "[pipeline]".yellow());
    println!(
        "  {} = {} {}",
        "debounce_ms".cyan(),
        config.pipeline.debounce_ms,
        format!("({}ms quiescence window)", config.pipeline.debounce_ms).dimmed()
    );
    println!(
        "  {} = {}",
        "page_size".cyan(),
        config.pipeline.page_size
    );

    println!("\n{}", "[demo]".yellow());
    println!("  {} = {}", "latency_ms".cyan(), config.demo.latency_ms);
    println!("  {} = {}", "jitter_ms".cyan(), config.demo.jitter_ms);
    println!(
        "  {} = {}",
        "typing_delay_ms".cyan(),
        config.demo.typing_delay_ms
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  debounce_ms: 0-{}", PipelineConfig::MAX_DEBOUNCE_MS);
    println!("  page_size: 1-{}", PipelineConfig::MAX_PAGE_SIZE);

    Ok(())
}
