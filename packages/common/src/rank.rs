use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when a rank cannot be assigned at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("Rank must be between 1 and {max}, got {rank}")]
    OutOfRange { rank: i32, max: i32 },
    #[error("There are no entries to rank")]
    NoEntries,
}

/// Check `rank` against a contest of `entry_count` entries (valid ranks are `1..=entry_count`).
pub fn validate_rank(rank: i32, entry_count: u64) -> Result<(), RankError> {
    if entry_count == 0 {
        return Err(RankError::NoEntries);
    }
    let max = i32::try_from(entry_count).unwrap_or(i32::MAX);
    if rank < 1 || rank > max {
        return Err(RankError::OutOfRange { rank, max });
    }
    Ok(())
}

/// The boundary inside which each rank can be held by at most one entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankScope {
    /// The predictions owned by one identity.
    Predictions(Uuid),
    /// The single, global results set.
    Results,
}

impl RankScope {
    /// Stable 64-bit key for the scope, usable as a lock id.
    pub fn lock_key(&self) -> i64 {
        match self {
            // Prediction keys are masked to be non-negative.
            Self::Results => i64::MIN,
            Self::Predictions(owner) => {
                let (hi, lo) = owner.as_u64_pair();
                (hi ^ lo) as i64 & i64::MAX
            }
        }
    }
}

impl fmt::Display for RankScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predictions(owner) => write!(f, "predictions of {owner}"),
            Self::Results => f.write_str("results"),
        }
    }
}

/// What to do with the record bound to the target entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankWrite<K> {
    /// Move the existing record to the new rank.
    Update(K),
    /// Create a fresh record for the entry.
    Insert,
}

/// The steps needed to bind an entry to a rank within one scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankPlan<K> {
    /// Record that currently holds the rank for another entry and must be removed first.
    pub evict: Option<K>,
    pub write: RankWrite<K>,
}

/// Plan a rank assignment from the two lookups a store performs.
///
/// `for_entry` is the record already bound to the target entry, `for_rank` the
/// record currently holding the target rank. Either may be missing; when both
/// are the same record nothing is evicted.
pub fn plan_assignment<K>(for_entry: Option<K>, for_rank: Option<K>) -> RankPlan<K>
where
    K: PartialEq + Copy,
{
    let evict = for_rank.filter(|holder| for_entry != Some(*holder));
    let write = match for_entry {
        Some(key) => RankWrite::Update(key),
        None => RankWrite::Insert,
    };
    RankPlan { evict, write }
}

/// Confirmed outcome of a rank assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RankAssignment {
    pub entry_id: i32,
    pub rank: i32,
    /// Entry that held the rank before and is now unranked.
    pub evicted_entry: Option<i32>,
}
