//! Random source trait

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::Result;

/// Provider of unique random integers for one field
#[async_trait]
pub trait RandomSource: Send + Sync {
    /// Draw `count` distinct integers from `[min, max]` without replacement
    async fn draw_unique_integers(&self, count: u32, min: i64, max: i64) -> Result<BTreeSet<i64>>;
}
