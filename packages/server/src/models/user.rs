use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Public view of an identity.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    /// Stable identity ID.
    pub id: Uuid,
    /// Display name, unique across identities.
    #[schema(example = "Alice")]
    pub name: String,
    /// Whether this identity may enter results.
    #[schema(example = false)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::user::Model> for UserResponse {
    fn from(m: crate::entity::user::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            is_admin: m.is_admin,
            created_at: m.created_at,
        }
    }
}
