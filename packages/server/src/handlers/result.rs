use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use podium_common::{RankAssignment, RankScope};
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::result::ResultResponse;
use crate::models::shared::AssignRankRequest;
use crate::state::AppState;
use crate::utils::entry::{entries_by_id, find_entry, require_rankable};

#[utoipa::path(
    get,
    path = "/",
    tag = "Results",
    operation_id = "listResults",
    summary = "List the official results",
    description = "Returns every entry that has a final rank, ordered by rank. Empty until the administrator publishes results.",
    responses(
        (status = 200, description = "Official results", body = Vec<ResultResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_results(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ResultResponse>>, AppError> {
    let placements = state.ranks.placements(RankScope::Results).await?;
    let entries = entries_by_id(&state.db).await?;

    let data = placements
        .into_iter()
        .filter_map(|p| {
            let entry = entries.get(&p.entry_id)?;
            Some(ResultResponse {
                entry_id: p.entry_id,
                entry_name: entry.name.clone(),
                flag_code: entry.flag_code.clone(),
                rank: p.rank,
            })
        })
        .collect();

    Ok(Json(data))
}

#[utoipa::path(
    put,
    path = "/{entry_id}",
    tag = "Results",
    operation_id = "assignResult",
    summary = "Set an entry's final rank",
    description = "Admin only. Same rule as predictions, applied to the single global result set: an entry previously holding the rank loses it and is reported in `evicted_entry`.",
    params(("entry_id" = i32, Path, description = "Entry ID")),
    request_body = AssignRankRequest,
    responses(
        (status = 200, description = "Result stored", body = RankAssignment),
        (status = 400, description = "Rank out of range (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Entry not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Concurrent conflicting write (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(rank = payload.rank))]
pub async fn assign_result(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<i32>,
    AppJson(payload): AppJson<AssignRankRequest>,
) -> Result<Json<RankAssignment>, AppError> {
    auth_user.require_admin()?;
    require_rankable(&state.db, entry_id, payload.rank).await?;

    let outcome = state
        .ranks
        .assign(RankScope::Results, entry_id, payload.rank)
        .await?;

    info!(entry_id, rank = outcome.rank, "Result recorded");
    Ok(Json(outcome))
}

#[utoipa::path(
    delete,
    path = "/{entry_id}",
    tag = "Results",
    operation_id = "clearResult",
    summary = "Remove an entry's final rank",
    description = "Admin only.",
    params(("entry_id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 204, description = "Result removed"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Entry not found or has no result (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn clear_result(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    find_entry(&state.db, entry_id).await?;

    if !state.ranks.clear(RankScope::Results, entry_id).await? {
        return Err(AppError::NotFound("No result for this entry".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
