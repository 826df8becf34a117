//! Domain modules organized as vertical slices, one per dataset.
//!
//! Each sub-module contains:
//! - `mod.rs` — The record type as the endpoint serves it, plus derived views
//! - `client.rs` — Sub-client with one-shot HTTP fetch and store access

pub mod block;
pub mod market;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two independently refreshed datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Blocks,
    Market,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::Blocks, Dataset::Market];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Blocks => "blocks",
            Dataset::Market => "market",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
