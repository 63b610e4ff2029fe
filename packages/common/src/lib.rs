pub mod identity;
pub mod leaderboard;
pub mod rank;
pub mod score;
pub mod store;

pub use leaderboard::{Standing, standings};
pub use rank::{RankAssignment, RankError, RankScope};
pub use score::{Placement, Ranked, points_for, score, total_score};
pub use store::{RankStore, StoreError};
