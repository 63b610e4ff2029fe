use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use podium_common::{RankAssignment, RankScope, Ranked, points_for};
use tracing::instrument;
use uuid::Uuid;

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::prediction::{PredictionListResponse, PredictionResponse};
use crate::models::shared::AssignRankRequest;
use crate::state::AppState;
use crate::utils::entry::{entries_by_id, find_entry, find_user, require_rankable};

/// Join one identity's rank records with entry data and current points.
async fn prediction_list(
    state: &AppState,
    owner: user::Model,
) -> Result<PredictionListResponse, AppError> {
    let placements = state
        .ranks
        .placements(RankScope::Predictions(owner.id))
        .await?;
    let results: Vec<Ranked> = state.ranks.placements(RankScope::Results).await?;
    let entries = entries_by_id(&state.db).await?;

    let data: Vec<PredictionResponse> = placements
        .iter()
        .filter_map(|p| {
            let entry = entries.get(&p.entry_id)?;
            Some(PredictionResponse {
                entry_id: p.entry_id,
                entry_name: entry.name.clone(),
                flag_code: entry.flag_code.clone(),
                rank: p.rank,
                points: points_for(p, &results),
            })
        })
        .collect();
    let total_points = data.iter().filter_map(|p| p.points).sum();

    Ok(PredictionListResponse {
        user: owner.into(),
        data,
        total_points,
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Predictions",
    operation_id = "listMyPredictions",
    summary = "List the caller's predictions",
    description = "Returns the caller's ranked guesses ordered by rank, with points for every entry that already has a result.",
    responses(
        (status = 200, description = "Caller's predictions", body = PredictionListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Identity no longer exists (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_my_predictions(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<PredictionListResponse>, AppError> {
    let owner = find_user(&state.db, auth_user.user_id).await?;
    Ok(Json(prediction_list(&state, owner).await?))
}

#[utoipa::path(
    get,
    path = "/{user_id}/predictions",
    tag = "Predictions",
    operation_id = "listUserPredictions",
    summary = "List another identity's predictions",
    description = "Read-only view of any identity's ranked guesses, ordered by rank.",
    params(("user_id" = Uuid, Path, description = "Identity ID")),
    responses(
        (status = 200, description = "The identity's predictions", body = PredictionListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_user_predictions(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PredictionListResponse>, AppError> {
    let owner = find_user(&state.db, user_id).await?;
    Ok(Json(prediction_list(&state, owner).await?))
}

#[utoipa::path(
    put,
    path = "/{entry_id}",
    tag = "Predictions",
    operation_id = "assignPrediction",
    summary = "Predict an entry's rank",
    description = "Binds the entry to the rank in the caller's predictions. If another of the caller's entries held that rank it loses it, and the response names it in `evicted_entry`. Reassigning an entry moves its single prediction.",
    params(("entry_id" = i32, Path, description = "Entry ID")),
    request_body = AssignRankRequest,
    responses(
        (status = 200, description = "Prediction stored", body = RankAssignment),
        (status = 400, description = "Rank out of range (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Entry not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Concurrent conflicting write (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id, rank = payload.rank))]
pub async fn assign_prediction(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<i32>,
    AppJson(payload): AppJson<AssignRankRequest>,
) -> Result<Json<RankAssignment>, AppError> {
    find_user(&state.db, auth_user.user_id).await?;
    require_rankable(&state.db, entry_id, payload.rank).await?;

    let outcome = state
        .ranks
        .assign(
            RankScope::Predictions(auth_user.user_id),
            entry_id,
            payload.rank,
        )
        .await?;

    Ok(Json(outcome))
}

#[utoipa::path(
    delete,
    path = "/{entry_id}",
    tag = "Predictions",
    operation_id = "clearPrediction",
    summary = "Remove a prediction",
    description = "Leaves the entry unranked in the caller's predictions.",
    params(("entry_id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 204, description = "Prediction removed"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Entry not found or not predicted (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn clear_prediction(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    find_entry(&state.db, entry_id).await?;

    let removed = state
        .ranks
        .clear(RankScope::Predictions(auth_user.user_id), entry_id)
        .await?;
    if !removed {
        return Err(AppError::NotFound("No prediction for this entry".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
