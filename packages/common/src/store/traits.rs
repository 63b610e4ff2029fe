use async_trait::async_trait;

use super::error::StoreError;
use crate::rank::{RankAssignment, RankScope};
use crate::score::Ranked;

/// Rank-per-scope record storage for predictions and results.
///
/// Implementations must apply [`assign`](RankStore::assign) atomically: a
/// concurrent reader or writer of the same scope never observes the eviction
/// without the write, and no two records in a scope ever share a rank or an
/// entry.
#[async_trait]
pub trait RankStore: Send + Sync {
    /// Bind `entry_id` to `rank` in `scope`, evicting whichever entry held the rank.
    async fn assign(
        &self,
        scope: RankScope,
        entry_id: i32,
        rank: i32,
    ) -> Result<RankAssignment, StoreError>;

    /// Remove the rank of `entry_id` in `scope`.
    ///
    /// Returns `true` if a record was removed, `false` if the entry was unranked.
    async fn clear(&self, scope: RankScope, entry_id: i32) -> Result<bool, StoreError>;

    /// All `(entry, rank)` bindings in `scope`, ordered by rank.
    async fn placements(&self, scope: RankScope) -> Result<Vec<Ranked>, StoreError>;
}
