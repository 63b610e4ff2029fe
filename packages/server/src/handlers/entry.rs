use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{entry, prediction, result};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::entry::{CreateEntryRequest, EntryResponse, validate_create_entry};
use crate::models::shared::trim_optional;
use crate::state::AppState;
use crate::utils::entry::find_entry;

#[utoipa::path(
    get,
    path = "/",
    tag = "Entries",
    operation_id = "listEntries",
    summary = "List all entries",
    description = "Returns every entry of the contest ordered by ID. The number of entries is the highest assignable rank.",
    responses(
        (status = 200, description = "All entries", body = Vec<EntryResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_entries(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<EntryResponse>>, AppError> {
    let entries = entry::Entity::find()
        .order_by_asc(entry::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(entries.into_iter().map(EntryResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Entries",
    operation_id = "getEntry",
    summary = "Get an entry by ID",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry details", body = EntryResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Entry not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_entry(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EntryResponse>, AppError> {
    let model = find_entry(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Entries",
    operation_id = "createEntry",
    summary = "Add an entry",
    description = "Adds an entry to the contest. Admin only. Entries are fixed once play starts, so this fails with 409 as soon as any prediction or result exists, or when the ID is already taken.",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = EntryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "ID taken or play already started (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_entry(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    validate_create_entry(&payload)?;

    let txn = state.db.begin().await?;

    let in_play = prediction::Entity::find().one(&txn).await?.is_some()
        || result::Entity::find().one(&txn).await?.is_some();
    if in_play {
        return Err(AppError::Conflict(
            "Entries cannot change once predictions or results exist".into(),
        ));
    }

    let id = match payload.id {
        Some(id) => id,
        None => {
            let max_id: Option<i32> = entry::Entity::find()
                .select_only()
                .column_as(entry::Column::Id.max(), "max_id")
                .into_tuple::<Option<i32>>()
                .one(&txn)
                .await?
                .flatten();
            max_id
                .unwrap_or(0)
                .checked_add(1)
                .ok_or_else(|| AppError::Conflict("No free entry ID".into()))?
        }
    };

    let new_entry = entry::ActiveModel {
        id: Set(id),
        name: Set(payload.name.trim().to_string()),
        flag_code: Set(payload.flag_code.trim().to_lowercase()),
        artist: Set(trim_optional(payload.artist)),
        song: Set(trim_optional(payload.song)),
        ..Default::default()
    };

    match new_entry.insert(&txn).await {
        Ok(model) => {
            txn.commit().await?;
            info!(entry_id = model.id, "Created entry");
            Ok((StatusCode::CREATED, Json(EntryResponse::from(model))))
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(AppError::Conflict(format!("Entry ID {id} already exists")))
        }
        Err(e) => Err(e.into()),
    }
}
