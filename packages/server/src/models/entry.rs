use serde::{Deserialize, Serialize};

use super::shared::{validate_optional_text, validate_text};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateEntryRequest {
    /// Explicit entry ID. When omitted the next free ID is used.
    #[schema(example = 7)]
    pub id: Option<i32>,
    /// Display name (1-128 characters).
    #[schema(example = "Sweden")]
    pub name: String,
    /// Image reference code, e.g. a lowercase ISO country code (1-16 characters).
    #[schema(example = "se")]
    pub flag_code: String,
    /// Performer.
    #[schema(example = "KAJ")]
    pub artist: Option<String>,
    /// Title of the piece.
    #[schema(example = "Bara bada bastu")]
    pub song: Option<String>,
}

pub fn validate_create_entry(payload: &CreateEntryRequest) -> Result<(), AppError> {
    if let Some(id) = payload.id
        && id < 1
    {
        return Err(AppError::Validation("Entry ID must be >= 1".into()));
    }
    validate_text("Name", &payload.name, 128)?;
    validate_text("Flag code", &payload.flag_code, 16)?;
    validate_optional_text("Artist", payload.artist.as_deref(), 256)?;
    validate_optional_text("Song", payload.song.as_deref(), 256)?;
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EntryResponse {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = "Sweden")]
    pub name: String,
    #[schema(example = "se")]
    pub flag_code: String,
    pub artist: Option<String>,
    pub song: Option<String>,
}

impl From<crate::entity::entry::Model> for EntryResponse {
    fn from(m: crate::entity::entry::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            flag_code: m.flag_code,
            artist: m.artist,
            song: m.song,
        }
    }
}
