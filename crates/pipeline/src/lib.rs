//! Product listing pipeline for Shopfeed
//!
//! This crate provides the incremental, filterable, deduplicated
//! product-listing pipeline:
//! - Query debouncing (one committed query per quiescence window)
//! - Result accumulation (order-preserving, first-occurrence-wins dedup)
//! - Pagination trigger state machine (single in-flight fetch guard)
//! - Filter state with toggle semantics and validation
//! - A single-task event-loop driver wiring the above to a search provider
//!
//! All pipeline state is owned by one tokio task. External inputs and fetch
//! completions arrive as events; fetch completions are tagged with the
//! search key they were issued under, so completions for superseded keys are
//! discarded no matter when they arrive.

pub mod accumulator;
pub mod config;
pub mod debounce;
pub mod driver;
pub mod filter_state;
pub mod trigger;
pub mod view;

// Re-exports
pub use accumulator::ResultAccumulator;
pub use config::PipelineConfig;
pub use debounce::QueryDebouncer;
pub use driver::{ListingPipeline, PipelineError, PipelineHandle};
pub use filter_state::FilterState;
pub use trigger::{FetchPlan, PageTrigger, TriggerState};
pub use view::{ListingPhase, ListingView};
