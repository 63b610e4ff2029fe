use std::collections::HashMap;

use podium_common::rank::validate_rank;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder};
use uuid::Uuid;

use crate::entity::{entry, user};
use crate::error::AppError;

/// Look up an entry by ID, returning 404 if not found.
pub async fn find_entry<C: ConnectionTrait>(db: &C, id: i32) -> Result<entry::Model, AppError> {
    entry::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".into()))
}

/// Look up an identity by ID, returning 404 if not found.
pub async fn find_user<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

/// Check that `entry_id` exists and `rank` lies within 1..=number of entries.
pub async fn require_rankable<C: ConnectionTrait>(
    db: &C,
    entry_id: i32,
    rank: i32,
) -> Result<(), AppError> {
    find_entry(db, entry_id).await?;
    let entry_count = entry::Entity::find().count(db).await?;
    validate_rank(rank, entry_count)?;
    Ok(())
}

/// All entries keyed by ID, for joining names onto rank records.
pub async fn entries_by_id<C: ConnectionTrait>(
    db: &C,
) -> Result<HashMap<i32, entry::Model>, AppError> {
    let entries = entry::Entity::find()
        .order_by_asc(entry::Column::Id)
        .all(db)
        .await?;
    Ok(entries.into_iter().map(|e| (e.id, e)).collect())
}
