use serde::Serialize;

/// The final rank of one entry.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ResultResponse {
    #[schema(example = 7)]
    pub entry_id: i32,
    #[schema(example = "Sweden")]
    pub entry_name: String,
    #[schema(example = "se")]
    pub flag_code: String,
    #[schema(example = 1)]
    pub rank: i32,
}
