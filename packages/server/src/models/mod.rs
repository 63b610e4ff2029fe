pub mod auth;
pub mod entry;
pub mod leaderboard;
pub mod prediction;
pub mod result;
pub mod shared;
pub mod user;
