use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use podium_common::{RankScope, Ranked, standings};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{prediction, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::leaderboard::{LeaderboardResponse, StandingResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Leaderboard",
    operation_id = "getLeaderboard",
    summary = "Current standings",
    description = "Every identity with its total score against the results entered so far, best first. Identities with equal scores keep their registration order and still get distinct places.",
    responses(
        (status = 200, description = "Standings", body = LeaderboardResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_leaderboard(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let users = user::Entity::find()
        .order_by_asc(user::Column::CreatedAt)
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await?;

    let rows: Vec<(Uuid, i32, i32)> = prediction::Entity::find()
        .select_only()
        .column(prediction::Column::UserId)
        .column(prediction::Column::EntryId)
        .column(prediction::Column::Rank)
        .into_tuple()
        .all(&state.db)
        .await?;

    let mut by_user: HashMap<Uuid, Vec<Ranked>> = HashMap::new();
    for (user_id, entry_id, rank) in rows {
        by_user
            .entry(user_id)
            .or_default()
            .push(Ranked::new(entry_id, rank));
    }

    let results = state.ranks.placements(RankScope::Results).await?;

    let participants = users.into_iter().map(|u| {
        let predictions = by_user.remove(&u.id).unwrap_or_default();
        (u, predictions)
    });

    let standings = standings(participants, &results)
        .into_iter()
        .map(|s| StandingResponse {
            place: s.place,
            user_id: s.participant.id,
            name: s.participant.name,
            score: s.score,
        })
        .collect();

    Ok(Json(LeaderboardResponse {
        results_published: !results.is_empty(),
        standings,
    }))
}
