use serde::Serialize;

use super::user::UserResponse;

/// One ranked guess, joined with its entry.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PredictionResponse {
    #[schema(example = 7)]
    pub entry_id: i32,
    #[schema(example = "Sweden")]
    pub entry_name: String,
    #[schema(example = "se")]
    pub flag_code: String,
    #[schema(example = 1)]
    pub rank: i32,
    /// Points earned so far; absent while the entry has no result.
    #[schema(example = 10)]
    pub points: Option<u32>,
}

/// All predictions of one identity, ordered by rank.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PredictionListResponse {
    pub user: UserResponse,
    pub data: Vec<PredictionResponse>,
    /// Sum of `points` over `data`.
    #[schema(example = 24)]
    pub total_points: u32,
}
