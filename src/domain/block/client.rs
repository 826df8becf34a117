//! Blocks sub-client — one-shot fetches and reads of the block dataset.

use super::{Block, BlockSummary};
use crate::client::Dashboard;
use crate::error::DashboardError;
use crate::projection::{latest_block, BlockSeries};
use std::sync::Arc;

/// Sub-client for the block dataset.
pub struct Blocks<'a> {
    pub(crate) client: &'a Dashboard,
}

impl<'a> Blocks<'a> {
    /// Fetch the current window without touching the store.
    pub async fn fetch(&self) -> Result<Vec<Block>, DashboardError> {
        Ok(self.client.http.get_blocks().await?)
    }

    /// Fetch once and replace the stored blocks. On failure the stored
    /// blocks are left as they were.
    pub async fn refresh(&self) -> Result<usize, DashboardError> {
        let blocks = self.fetch().await?;
        let len = blocks.len();
        self.client.store.replace_blocks(blocks).await;
        Ok(len)
    }

    pub async fn current(&self) -> Arc<Vec<Block>> {
        self.client.store.blocks().await
    }

    /// The "current block" card, if any block is known.
    pub async fn latest(&self) -> Option<BlockSummary> {
        let blocks = self.current().await;
        latest_block(&blocks).map(BlockSummary::from)
    }

    pub async fn series(&self) -> BlockSeries {
        BlockSeries::project(&self.current().await)
    }
}
