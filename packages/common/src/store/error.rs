use thiserror::Error;

/// Errors reported by a [`RankStore`](super::RankStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A concurrent writer got in the way and the store refused the write.
    #[error("conflicting rank assignment: {0}")]
    Conflict(String),

    /// The backing store failed.
    #[error("rank store backend error: {0}")]
    Backend(String),
}
