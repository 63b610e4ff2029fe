use axum::{Json, extract::State};
use chrono::Utc;
use sea_orm::*;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, MeResponse, validate_login_request};
use crate::state::AppState;
use crate::utils::jwt;

async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Name.eq(name))
        .one(db)
        .await
}

/// Create the identity for `name`, or return the one a concurrent login just created.
async fn create_user(state: &AppState, name: &str) -> Result<user::Model, AppError> {
    let new_user = user::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(name.to_string()),
        is_admin: Set(state.admin.is_admin(name)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    match new_user.insert(&state.db).await {
        Ok(model) => Ok(model),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            tracing::debug!("Login race condition: identity created concurrently");
            find_by_name(&state.db, name)
                .await?
                .ok_or_else(|| AppError::Internal(format!("identity '{name}' vanished after insert race")))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in by name",
    description = "Resolves the identity with exactly this name, creating it on first use, and returns a bearer token. The configured admin name (default `Admin`, case-sensitive) is created with the admin flag. There is no password.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let name = validate_login_request(&payload)?;

    let (user, created) = match find_by_name(&state.db, name).await? {
        Some(existing) => (existing, false),
        None => (create_user(&state, name).await?, true),
    };

    if created {
        info!(user_id = %user.id, is_admin = user.is_admin, "Created identity");
    }

    let token = jwt::sign(
        user.id,
        &user.name,
        user.is_admin,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_days,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
        created,
    }))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Current identity",
    description = "Returns the identity carried by the bearer token.",
    responses(
        (status = 200, description = "Current identity", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user), fields(user_id = %auth_user.user_id))]
pub async fn me(auth_user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: auth_user.user_id,
        name: auth_user.name,
        is_admin: auth_user.is_admin,
    })
}
