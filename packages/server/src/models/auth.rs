use podium_common::identity::{MAX_NAME_LEN, normalize_name};
use serde::{Deserialize, Serialize};

use super::user::UserResponse;
use crate::error::AppError;

/// Request body for login. Unknown names are registered on the fly.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Display name (1-64 characters after trimming). Case-sensitive.
    #[schema(example = "Alice")]
    pub name: String,
}

/// Returns the trimmed name to log in with.
pub fn validate_login_request(payload: &LoginRequest) -> Result<&str, AppError> {
    normalize_name(&payload.name)
        .ok_or_else(|| AppError::Validation(format!("Name must be 1-{MAX_NAME_LEN} characters")))
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// The resolved identity.
    pub user: UserResponse,
    /// `true` if this login created the identity.
    pub created: bool,
}

/// Identity carried by the presented token.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    pub id: uuid::Uuid,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = false)]
    pub is_admin: bool,
}
