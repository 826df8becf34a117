//! Polling scheduler — periodic fetch-and-replace for both datasets.
//!
//! Each dataset gets its own background ticker task. The first tick fires
//! immediately on [`PollingScheduler::start`], then every `period`. A tick
//! never waits on an earlier fetch: it spawns a fresh fetch task, so a slow
//! or hung request stalls only itself, and when two fetches of the same
//! dataset overlap the one that lands last wins.
//!
//! Every activation owns a cancellation flag. Fetch tasks apply their result
//! through the store's gated replace, which reads the flag under the slot's
//! write lock, so a response that arrives after [`PollingScheduler::stop`]
//! is dropped instead of written.

use crate::domain::block::Block;
use crate::domain::market::MarketDataPoint;
use crate::domain::Dataset;
use crate::error::HttpError;
use crate::http::DashboardHttp;
use crate::store::DatasetStore;

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

// ─── Source ──────────────────────────────────────────────────────────────────

/// Where the scheduler gets its data from.
///
/// Implemented by [`DashboardHttp`]; tests drive the scheduler with scripted
/// sources instead.
pub trait DatasetSource: Send + Sync + 'static {
    fn fetch_blocks(&self) -> impl Future<Output = Result<Vec<Block>, HttpError>> + Send;

    fn fetch_market(&self) -> impl Future<Output = Result<Vec<MarketDataPoint>, HttpError>> + Send;
}

impl DatasetSource for DashboardHttp {
    fn fetch_blocks(&self) -> impl Future<Output = Result<Vec<Block>, HttpError>> + Send {
        self.get_blocks()
    }

    fn fetch_market(&self) -> impl Future<Output = Result<Vec<MarketDataPoint>, HttpError>> + Send {
        self.get_market()
    }
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// Outcome of one fetch cycle, published for observers.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshEvent {
    /// The dataset was replaced with `len` records.
    Updated { dataset: Dataset, len: usize },
    /// The fetch failed; the dataset kept its previous contents.
    Failed { dataset: Dataset, error: String },
    /// The scheduler was stopped before the result could be applied; the
    /// result, if any, was dropped.
    Discarded { dataset: Dataset },
}

/// What a cycle did with a successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleOutcome {
    Applied(usize),
    Discarded,
}

// ─── Scheduler ───────────────────────────────────────────────────────────────

struct Run {
    cancelled: Arc<AtomicBool>,
    tickers: Vec<JoinHandle<()>>,
}

impl Run {
    fn cancel(self) {
        self.cancelled.store(true, Ordering::SeqCst);
        for handle in self.tickers {
            handle.abort();
        }
    }
}

/// Drives the two refresh loops for one [`DatasetStore`].
pub struct PollingScheduler<S> {
    source: Arc<S>,
    store: DatasetStore,
    period: Duration,
    event_tx: Option<mpsc::Sender<RefreshEvent>>,
    run: Option<Run>,
}

impl<S: DatasetSource> PollingScheduler<S> {
    pub fn new(source: Arc<S>, store: DatasetStore, period: Duration) -> Self {
        Self {
            source,
            store,
            period,
            event_tx: None,
            run: None,
        }
    }

    /// Publish a [`RefreshEvent`] per cycle on `tx`. Events are dropped when
    /// the channel is full.
    pub fn with_events(mut self, tx: mpsc::Sender<RefreshEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Start both refresh loops. Must be called within a tokio runtime.
    ///
    /// Returns `false` if the scheduler was already running.
    pub fn start(&mut self) -> bool {
        if self.run.is_some() {
            return false;
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        let tickers = Dataset::ALL
            .iter()
            .map(|&dataset| {
                tokio::spawn(run_ticker(Ticker {
                    dataset,
                    period: self.period,
                    source: Arc::clone(&self.source),
                    store: self.store.clone(),
                    cancelled: Arc::clone(&cancelled),
                    event_tx: self.event_tx.clone(),
                }))
            })
            .collect();

        tracing::info!(period_ms = self.period.as_millis() as u64, "Polling started");
        self.run = Some(Run { cancelled, tickers });
        true
    }

    /// Stop both refresh loops.
    ///
    /// Fetches already in flight are left to finish, but their results are
    /// discarded. Once this returns, the store is not written again by this
    /// activation.
    pub async fn stop(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        run.cancel();
        self.store.barrier().await;
        tracing::info!("Polling stopped");
    }
}

impl<S> Drop for PollingScheduler<S> {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            run.cancel();
        }
    }
}

// ─── Background tasks ────────────────────────────────────────────────────────

struct Ticker<S> {
    dataset: Dataset,
    period: Duration,
    source: Arc<S>,
    store: DatasetStore,
    cancelled: Arc<AtomicBool>,
    event_tx: Option<mpsc::Sender<RefreshEvent>>,
}

impl<S> Ticker<S> {
    fn cycle(&self) -> Cycle<S> {
        Cycle {
            dataset: self.dataset,
            source: Arc::clone(&self.source),
            store: self.store.clone(),
            cancelled: Arc::clone(&self.cancelled),
            event_tx: self.event_tx.clone(),
        }
    }
}

async fn run_ticker<S: DatasetSource>(ticker: Ticker<S>) {
    let mut interval = tokio::time::interval(ticker.period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if ticker.cancelled.load(Ordering::SeqCst) {
            return;
        }
        tracing::debug!(dataset = %ticker.dataset, "Refresh tick");
        tokio::spawn(run_cycle(ticker.cycle()));
    }
}

struct Cycle<S> {
    dataset: Dataset,
    source: Arc<S>,
    store: DatasetStore,
    cancelled: Arc<AtomicBool>,
    event_tx: Option<mpsc::Sender<RefreshEvent>>,
}

impl<S> Cycle<S> {
    fn emit(&self, event: RefreshEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.try_send(event);
        }
    }
}

/// One fetch-and-replace. Failures end here: they are logged and published,
/// never propagated.
async fn run_cycle<S: DatasetSource>(cycle: Cycle<S>) {
    let dataset = cycle.dataset;
    match fetch_and_apply(&cycle).await {
        Ok(CycleOutcome::Applied(len)) => {
            tracing::debug!(dataset = %dataset, len, "Dataset replaced");
            cycle.emit(RefreshEvent::Updated { dataset, len });
        }
        Ok(CycleOutcome::Discarded) => {
            tracing::debug!(dataset = %dataset, "Cycle discarded after stop");
            cycle.emit(RefreshEvent::Discarded { dataset });
        }
        Err(e) => {
            tracing::warn!(dataset = %dataset, error = %e, "Refresh failed, keeping previous data");
            cycle.emit(RefreshEvent::Failed {
                dataset,
                error: e.to_string(),
            });
        }
    }
}

async fn fetch_and_apply<S: DatasetSource>(cycle: &Cycle<S>) -> Result<CycleOutcome, HttpError> {
    // A tick that raced `stop()` must not reach the network.
    if cycle.cancelled.load(Ordering::SeqCst) {
        return Ok(CycleOutcome::Discarded);
    }

    let applied_len = match cycle.dataset {
        Dataset::Blocks => {
            let blocks = cycle.source.fetch_blocks().await?;
            let len = blocks.len();
            cycle
                .store
                .replace_blocks_unless(&cycle.cancelled, blocks)
                .await
                .then_some(len)
        }
        Dataset::Market => {
            let market = cycle.source.fetch_market().await?;
            let len = market.len();
            cycle
                .store
                .replace_market_unless(&cycle.cancelled, market)
                .await
                .then_some(len)
        }
    };

    Ok(match applied_len {
        Some(len) => CycleOutcome::Applied(len),
        None => CycleOutcome::Discarded,
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
