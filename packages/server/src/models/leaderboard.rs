use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, utoipa::ToSchema)]
pub struct StandingResponse {
    /// 1-based row number; ties are not merged.
    #[schema(example = 1)]
    pub place: usize,
    pub user_id: Uuid,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = 24)]
    pub score: u32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardResponse {
    /// `false` until the administrator has entered at least one result.
    pub results_published: bool,
    /// Every identity, best score first.
    pub standings: Vec<StandingResponse>,
}
