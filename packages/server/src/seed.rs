use std::path::Path;

use sea_orm::sea_query::{Index, IndexCreateStatement, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use serde::Deserialize;
use tracing::info;

use crate::entity::{entry, prediction, result};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read entries file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse entries file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid entry {id}: {reason}")]
    Invalid { id: i32, reason: String },
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// One `[[entries]]` table of the seed file.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct SeedEntry {
    pub id: i32,
    pub name: String,
    pub flag_code: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub song: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    entries: Vec<SeedEntry>,
}

/// Parse a seed file. IDs must be positive and unique; names must be non-empty.
pub fn parse_entries(text: &str) -> Result<Vec<SeedEntry>, SeedError> {
    let file: SeedFile = toml::from_str(text)?;

    let mut seen = std::collections::HashSet::new();
    for e in &file.entries {
        if e.id < 1 {
            return Err(SeedError::Invalid {
                id: e.id,
                reason: "ID must be >= 1".into(),
            });
        }
        if e.name.trim().is_empty() || e.flag_code.trim().is_empty() {
            return Err(SeedError::Invalid {
                id: e.id,
                reason: "name and flag_code must not be empty".into(),
            });
        }
        if !seen.insert(e.id) {
            return Err(SeedError::Invalid {
                id: e.id,
                reason: "duplicate ID".into(),
            });
        }
    }

    Ok(file.entries)
}

/// Insert the entries listed in `path`, leaving existing IDs untouched.
///
/// Nothing is inserted once predictions or results exist, since the entry
/// count bounds every stored rank.
pub async fn seed_entries(db: &DatabaseConnection, path: &Path) -> Result<(), SeedError> {
    let text = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let entries = parse_entries(&text)?;

    let in_play = prediction::Entity::find().one(db).await?.is_some()
        || result::Entity::find().one(db).await?.is_some();
    if in_play {
        tracing::warn!("Predictions or results exist; skipping entry seeding");
        return Ok(());
    }

    let mut inserted = 0u32;
    for e in entries {
        let model = entry::ActiveModel {
            id: Set(e.id),
            name: Set(e.name.trim().to_string()),
            flag_code: Set(e.flag_code.trim().to_lowercase()),
            artist: Set(e.artist),
            song: Set(e.song),
            ..Default::default()
        };

        let res = entry::Entity::insert(model)
            .on_conflict(
                OnConflict::column(entry::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match res {
            Ok(0) | Err(DbErr::RecordNotInserted) => {}
            Ok(_) => inserted += 1,
            Err(e) => return Err(e.into()),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new entries", inserted);
    }

    Ok(())
}

async fn create_index(db: &DatabaseConnection, name: &str, stmt: IndexCreateStatement) -> Result<(), DbErr> {
    db.execute_unprepared(&stmt.to_string(PostgresQueryBuilder))
        .await?;
    info!("Ensured index {} exists", name);
    Ok(())
}

/// Create the `(user_id, rank)` unique index on `prediction`.
///
/// `user_id` already carries the `user_entry` unique key, and a column takes
/// part in only one `unique_key` group, so this one is created by hand.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_index(
        db,
        "idx_prediction_user_rank",
        Index::create()
            .if_not_exists()
            .unique()
            .name("idx_prediction_user_rank")
            .table(prediction::Entity)
            .col(prediction::Column::UserId)
            .col(prediction::Column::Rank)
            .to_owned(),
    )
    .await
}
