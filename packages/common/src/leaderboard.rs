use crate::score::{Placement, total_score};

/// One row of the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing<T> {
    /// 1-based position in the sorted list.
    pub place: usize,
    pub participant: T,
    pub score: u32,
}

/// Score every participant's predictions against the results and order by score.
///
/// Sorting is stable: participants with equal scores keep their input order.
pub fn standings<T, P, R, I>(participants: I, results: &[R]) -> Vec<Standing<T>>
where
    I: IntoIterator<Item = (T, Vec<P>)>,
    P: Placement,
    R: Placement,
{
    let mut scored: Vec<(T, u32)> = participants
        .into_iter()
        .map(|(participant, predictions)| {
            let score = total_score(&predictions, results);
            (participant, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (participant, score))| Standing {
            place: i + 1,
            participant,
            score,
        })
        .collect()
}
