use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::error::StoreError;
use super::traits::RankStore;
use crate::rank::{RankAssignment, RankScope, RankWrite, plan_assignment};
use crate::score::Ranked;

#[derive(Clone, Copy, Debug)]
struct Record {
    id: u64,
    entry_id: i32,
    rank: i32,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    scopes: HashMap<RankScope, Vec<Record>>,
}

/// In-process rank store.
///
/// Every operation runs under one lock, so assignments are trivially atomic.
/// Ranks are not bounds-checked; callers validate them against the entry count.
#[derive(Default)]
pub struct MemoryRankStore {
    inner: Mutex<Inner>,
}

impl MemoryRankStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RankStore for MemoryRankStore {
    async fn assign(
        &self,
        scope: RankScope,
        entry_id: i32,
        rank: i32,
    ) -> Result<RankAssignment, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let fresh_id = inner.next_id;
        let records = inner.scopes.entry(scope).or_default();

        let for_entry = records.iter().find(|r| r.entry_id == entry_id).map(|r| r.id);
        let for_rank = records.iter().find(|r| r.rank == rank).map(|r| r.id);
        let plan = plan_assignment(for_entry, for_rank);

        let mut evicted_entry = None;
        if let Some(evict_id) = plan.evict
            && let Some(pos) = records.iter().position(|r| r.id == evict_id)
        {
            evicted_entry = Some(records.remove(pos).entry_id);
        }

        match plan.write {
            RankWrite::Update(id) => {
                if let Some(record) = records.iter_mut().find(|r| r.id == id) {
                    record.rank = rank;
                }
            }
            RankWrite::Insert => records.push(Record {
                id: fresh_id,
                entry_id,
                rank,
            }),
        }

        if let Some(evicted) = evicted_entry {
            tracing::debug!(%scope, entry_id, rank, evicted, "Rank moved to another entry");
        }

        Ok(RankAssignment {
            entry_id,
            rank,
            evicted_entry,
        })
    }

    async fn clear(&self, scope: RankScope, entry_id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(records) = inner.scopes.get_mut(&scope) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|r| r.entry_id != entry_id);
        Ok(records.len() != before)
    }

    async fn placements(&self, scope: RankScope) -> Result<Vec<Ranked>, StoreError> {
        let inner = self.inner.lock().await;
        let mut placements: Vec<Ranked> = inner
            .scopes
            .get(&scope)
            .map(|records| {
                records
                    .iter()
                    .map(|r| Ranked::new(r.entry_id, r.rank))
                    .collect()
            })
            .unwrap_or_default();
        placements.sort_by_key(|p| p.rank);
        Ok(placements)
    }
}
