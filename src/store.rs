//! Dataset store — the two live collections behind the dashboard.
//!
//! Each slot holds an `Arc<Vec<_>>` behind an async `RwLock`. A replacement
//! swaps the pointer under the write lock, so a reader sees either the old
//! sequence or the new one, never a mix. Snapshots handed out earlier keep
//! their contents after a replacement.

use crate::domain::block::Block;
use crate::domain::market::MarketDataPoint;

use async_lock::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

struct Slot<T> {
    data: RwLock<Arc<Vec<T>>>,
    revision: AtomicU64,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            data: RwLock::new(Arc::new(Vec::new())),
            revision: AtomicU64::new(0),
        }
    }

    async fn snapshot(&self) -> Arc<Vec<T>> {
        self.data.read().await.clone()
    }

    async fn replace(&self, items: Vec<T>) {
        let mut guard = self.data.write().await;
        *guard = Arc::new(items);
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    /// The flag is read while holding the write lock.
    async fn replace_unless(&self, cancelled: &AtomicBool, items: Vec<T>) -> bool {
        let mut guard = self.data.write().await;
        if cancelled.load(Ordering::SeqCst) {
            return false;
        }
        *guard = Arc::new(items);
        self.revision.fetch_add(1, Ordering::SeqCst);
        true
    }

    /// Wait for any writer currently holding the lock.
    async fn barrier(&self) {
        let _guard = self.data.write().await;
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

struct Inner {
    blocks: Slot<Block>,
    market: Slot<MarketDataPoint>,
}

/// In-memory home of the block and market datasets.
///
/// Cheap to clone; clones share the same slots.
#[derive(Clone)]
pub struct DatasetStore {
    inner: Arc<Inner>,
}

/// Both datasets as observed at one point in time.
#[derive(Debug, Clone, Default)]
pub struct DatasetSnapshot {
    pub blocks: Arc<Vec<Block>>,
    pub market: Arc<Vec<MarketDataPoint>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                blocks: Slot::new(),
                market: Slot::new(),
            }),
        }
    }

    // ── Blocks ───────────────────────────────────────────────────────────

    pub async fn blocks(&self) -> Arc<Vec<Block>> {
        self.inner.blocks.snapshot().await
    }

    /// Replace the whole block sequence.
    pub async fn replace_blocks(&self, blocks: Vec<Block>) {
        self.inner.blocks.replace(blocks).await;
    }

    /// Replace the block sequence unless `cancelled` is set.
    ///
    /// Returns whether the replacement was applied.
    pub async fn replace_blocks_unless(&self, cancelled: &AtomicBool, blocks: Vec<Block>) -> bool {
        self.inner.blocks.replace_unless(cancelled, blocks).await
    }

    /// Number of block replacements so far.
    pub fn blocks_revision(&self) -> u64 {
        self.inner.blocks.revision()
    }

    // ── Market ───────────────────────────────────────────────────────────

    pub async fn market(&self) -> Arc<Vec<MarketDataPoint>> {
        self.inner.market.snapshot().await
    }

    /// Replace the whole market sequence.
    pub async fn replace_market(&self, market: Vec<MarketDataPoint>) {
        self.inner.market.replace(market).await;
    }

    /// Replace the market sequence unless `cancelled` is set.
    ///
    /// Returns whether the replacement was applied.
    pub async fn replace_market_unless(
        &self,
        cancelled: &AtomicBool,
        market: Vec<MarketDataPoint>,
    ) -> bool {
        self.inner.market.replace_unless(cancelled, market).await
    }

    /// Number of market replacements so far.
    pub fn market_revision(&self) -> u64 {
        self.inner.market.revision()
    }

    // ── Both ─────────────────────────────────────────────────────────────

    pub async fn snapshot(&self) -> DatasetSnapshot {
        DatasetSnapshot {
            blocks: self.blocks().await,
            market: self.market().await,
        }
    }

    /// Combined revision; changes whenever either dataset is replaced.
    pub fn revision(&self) -> u64 {
        self.blocks_revision() + self.market_revision()
    }

    /// Empty both datasets.
    pub async fn clear(&self) {
        self.replace_blocks(Vec::new()).await;
        self.replace_market(Vec::new()).await;
    }

    /// Wait until no replacement is in progress on either dataset.
    pub(crate) async fn barrier(&self) {
        self.inner.blocks.barrier().await;
        self.inner.market.barrier().await;
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DatasetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetStore")
            .field("blocks_revision", &self.blocks_revision())
            .field("market_revision", &self.market_revision())
            .finish()
    }
}
