use serde::{Deserialize, Serialize};

/// Points awarded for an exact guess.
pub const MAX_POINTS: u32 = 12;

/// Points lost for every position the guess is off by.
pub const POINTS_PER_STEP: u32 = 2;

/// Anything that binds an entry to a rank: a prediction or a result.
pub trait Placement {
    fn entry_id(&self) -> i32;
    fn rank(&self) -> i32;
}

/// A bare `(entry, rank)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Ranked {
    pub entry_id: i32,
    pub rank: i32,
}

impl Ranked {
    pub fn new(entry_id: i32, rank: i32) -> Self {
        Self { entry_id, rank }
    }
}

impl Placement for Ranked {
    fn entry_id(&self) -> i32 {
        self.entry_id
    }

    fn rank(&self) -> i32 {
        self.rank
    }
}

impl<T: Placement + ?Sized> Placement for &T {
    fn entry_id(&self) -> i32 {
        (**self).entry_id()
    }

    fn rank(&self) -> i32 {
        (**self).rank()
    }
}

/// Points for guessing `predicted` when the entry actually finished `actual`.
///
/// | diff   | 0  | 1  | 2 | 3 | 4 | 5 | 6+ |
/// |--------|----|----|---|---|---|---|----|
/// | points | 12 | 10 | 8 | 6 | 4 | 2 | 0  |
///
/// Ranks are not range-checked here.
pub fn score(predicted: i32, actual: i32) -> u32 {
    let diff = predicted.abs_diff(actual);
    MAX_POINTS.saturating_sub(diff.saturating_mul(POINTS_PER_STEP))
}

/// Points earned by a single prediction, or `None` if its entry has no result yet.
pub fn points_for<P, R>(prediction: &P, results: &[R]) -> Option<u32>
where
    P: Placement + ?Sized,
    R: Placement,
{
    results
        .iter()
        .find(|r| r.entry_id() == prediction.entry_id())
        .map(|r| score(prediction.rank(), r.rank()))
}

/// Sum of [`points_for`] over all predictions; unjudged entries count as zero.
pub fn total_score<P, R>(predictions: &[P], results: &[R]) -> u32
where
    P: Placement,
    R: Placement,
{
    predictions
        .iter()
        .map(|p| points_for(p, results).unwrap_or(0))
        .sum()
}
