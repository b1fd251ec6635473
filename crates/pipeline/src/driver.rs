//! Event-loop driver
//!
//! One tokio task owns all listing state: the result accumulator, the
//! pagination trigger, the filter state, and the committed query. Inputs
//! arrive on channels:
//! - raw query edits go through the debouncer task and come back committed
//! - filter operations, submitted queries, and proximity signals come from
//!   the handle
//! - fetch completions come from spawned provider tasks, tagged with the
//!   key they were issued under
//!
//! Changing the key never aborts an in-flight provider call; its completion
//! is simply discarded when it arrives under a superseded key.

use std::sync::Arc;
use std::time::Duration;

use catalog::{Color, Page, SearchKey};
use parking_lot::RwLock;
use provider::{ProviderError, SearchProvider};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::accumulator::ResultAccumulator;
use crate::config::{ConfigError, PipelineConfig};
use crate::debounce::QueryDebouncer;
use crate::filter_state::FilterState;
use crate::trigger::PageTrigger;
use crate::view::ListingView;

/// Errors surfaced by the pipeline handle
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The pipeline task has stopped; no further input is accepted
    #[error("pipeline is shut down")]
    Closed,

    /// Configuration failed validation at spawn
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Inputs carried from the handle to the driver task
#[derive(Debug)]
enum Command {
    SubmitQuery(String),
    ToggleColor(Color),
    SetPriceRange { min: Option<u64>, max: Option<u64> },
    ClearFilters,
    LoadMore,
    Shutdown,
}

type FetchOutcome = (SearchKey, Result<Page, ProviderError>);

/// Handle for driving one listing pipeline
///
/// Cheap to clone. All methods are fire-and-forget sends into the driver
/// task; they fail only when the pipeline has shut down. The latest view is
/// available synchronously via [`view`](Self::view) or as a stream of
/// snapshots via [`subscribe`](Self::subscribe).
#[derive(Clone)]
pub struct PipelineHandle {
    edit_tx: mpsc::Sender<String>,
    cmd_tx: mpsc::Sender<Command>,
    view_rx: watch::Receiver<ListingView>,
    snapshot: Arc<RwLock<ListingView>>,
}

impl PipelineHandle {
    /// Feed one raw query edit (keystroke granularity); debounced
    pub async fn edit_query(&self, query: impl Into<String>) -> Result<(), PipelineError> {
        self.edit_tx
            .send(query.into())
            .await
            .map_err(|_| PipelineError::Closed)
    }

    /// Commit a query immediately, bypassing the debounce window
    /// (Enter-key / search-button semantics)
    pub async fn submit_query(&self, query: impl Into<String>) -> Result<(), PipelineError> {
        self.send(Command::SubmitQuery(query.into())).await
    }

    /// Toggle a color filter
    pub async fn toggle_color(&self, color: Color) -> Result<(), PipelineError> {
        self.send(Command::ToggleColor(color)).await
    }

    /// Set (or toggle off) the price range filter
    pub async fn set_price_range(
        &self,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<(), PipelineError> {
        self.send(Command::SetPriceRange { min, max }).await
    }

    /// Clear all filters
    pub async fn clear_filters(&self) -> Result<(), PipelineError> {
        self.send(Command::ClearFilters).await
    }

    /// Proximity signal: the renderer is near the end of the list
    pub async fn load_more(&self) -> Result<(), PipelineError> {
        self.send(Command::LoadMore).await
    }

    /// Stop the pipeline task
    pub async fn shutdown(&self) -> Result<(), PipelineError> {
        self.send(Command::Shutdown).await
    }

    /// Latest published view
    pub fn view(&self) -> ListingView {
        self.snapshot.read().clone()
    }

    /// Subscribe to view snapshots
    pub fn subscribe(&self) -> watch::Receiver<ListingView> {
        self.view_rx.clone()
    }

    async fn send(&self, cmd: Command) -> Result<(), PipelineError> {
        self.cmd_tx.send(cmd).await.map_err(|_| PipelineError::Closed)
    }
}

/// The listing pipeline driver
pub struct ListingPipeline {
    provider: Arc<dyn SearchProvider>,
    config: PipelineConfig,
    accumulator: ResultAccumulator,
    trigger: PageTrigger,
    filters: FilterState,
    query: String,
    notice: Option<String>,
    fetch_tx: mpsc::Sender<FetchOutcome>,
    view_tx: watch::Sender<ListingView>,
    snapshot: Arc<RwLock<ListingView>>,
}

impl ListingPipeline {
    /// Spawn the pipeline and its debouncer; returns the driving handle
    pub fn spawn(
        provider: Arc<dyn SearchProvider>,
        config: PipelineConfig,
    ) -> Result<PipelineHandle, PipelineError> {
        config.validate()?;

        let (edit_tx, edit_rx) = mpsc::channel(64);
        let (committed_tx, committed_rx) = mpsc::channel(8);
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (fetch_tx, fetch_rx) = mpsc::channel(8);
        let (view_tx, view_rx) = watch::channel(ListingView::initial());
        let snapshot = Arc::new(RwLock::new(ListingView::initial()));

        let debouncer = QueryDebouncer::new(
            Duration::from_millis(config.debounce_ms),
            edit_rx,
            committed_tx,
        );
        tokio::spawn(debouncer.run());

        let pipeline = Self {
            provider,
            config,
            accumulator: ResultAccumulator::new(),
            trigger: PageTrigger::new(),
            filters: FilterState::new(),
            query: String::new(),
            notice: None,
            fetch_tx,
            view_tx,
            snapshot: Arc::clone(&snapshot),
        };
        tokio::spawn(pipeline.run(cmd_rx, committed_rx, fetch_rx));

        Ok(PipelineHandle {
            edit_tx,
            cmd_tx,
            view_rx,
            snapshot,
        })
    }

    async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<Command>,
        mut committed_rx: mpsc::Receiver<String>,
        mut fetch_rx: mpsc::Receiver<FetchOutcome>,
    ) {
        loop {
            tokio::select! {
                committed = committed_rx.recv() => match committed {
                    Some(query) => self.on_query_committed(query),
                    // Debouncer gone (handle dropped): tear down
                    None => break,
                },
                cmd = cmd_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.on_command(cmd),
                },
                Some((key, result)) = fetch_rx.recv() => {
                    self.on_fetch_done(key, result);
                }
            }
            self.publish();
        }
        debug!("listing pipeline stopped");
    }

    fn on_command(&mut self, cmd: Command) {
        match cmd {
            Command::SubmitQuery(query) => self.on_query_committed(query),
            Command::ToggleColor(color) => {
                self.filters.toggle_color(color);
                self.reset_listing();
            }
            Command::SetPriceRange { min, max } => {
                match self.filters.set_price_range(min, max) {
                    Ok(()) => self.reset_listing(),
                    // Rejected at the filter boundary; prior selection kept
                    Err(e) => warn!(error = %e, "price range rejected"),
                }
            }
            Command::ClearFilters => {
                if self.filters.clear() {
                    self.reset_listing();
                }
            }
            Command::LoadMore => self.begin_fetch(),
            // Intercepted by the run loop
            Command::Shutdown => {}
        }
    }

    fn on_query_committed(&mut self, query: String) {
        info!(query = %query, "query committed, listing reset");
        self.query = query;
        self.reset_listing();
    }

    /// Replace the active key, clear accumulated state, fetch page one
    fn reset_listing(&mut self) {
        let key = SearchKey::new(self.query.clone(), self.filters.current().clone());
        self.accumulator.reset(key);
        self.trigger.reset();
        self.notice = None;
        self.begin_fetch();
    }

    /// Ask the trigger for a fetch plan and spawn the provider call
    fn begin_fetch(&mut self) {
        let Some(plan) = self.trigger.request_fetch() else {
            return;
        };

        let provider = Arc::clone(&self.provider);
        let key = self.accumulator.key().clone();
        let first = self.config.page_size;
        let fetch_tx = self.fetch_tx.clone();

        debug!(query = %key.query, cursor = ?plan.cursor, "issuing page fetch");
        tokio::spawn(async move {
            let result = provider
                .search(&key.query, &key.filters, plan.cursor.as_ref(), first)
                .await;
            // Driver gone: nothing to deliver to
            let _ = fetch_tx.send((key, result)).await;
        });
    }

    fn on_fetch_done(&mut self, key: SearchKey, result: Result<Page, ProviderError>) {
        if key != *self.accumulator.key() {
            debug!(query = %key.query, "completion for superseded key, ignored");
            return;
        }

        match result {
            Ok(page) => {
                self.trigger.on_page(&page);
                let appended = self.accumulator.ingest_page(page, &key).unwrap_or(0);
                self.notice = None;
                debug!(appended, total = self.accumulator.len(), "page ingested");
            }
            Err(e) => {
                warn!(error = %e, "page fetch failed");
                self.trigger.on_failure();
                self.notice = Some(e.to_string());
            }
        }
    }

    fn publish(&self) {
        let view = ListingView::compose(
            self.accumulator.key().clone(),
            self.accumulator.items().to_vec(),
            self.trigger.state(),
            self.notice.clone(),
        );
        *self.snapshot.write() = view.clone();
        let _ = self.view_tx.send(view);
    }
}
