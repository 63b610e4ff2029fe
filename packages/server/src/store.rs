use async_trait::async_trait;
use chrono::Utc;
use podium_common::rank::{RankWrite, plan_assignment};
use podium_common::{RankAssignment, RankScope, RankStore, Ranked, StoreError};
use sea_orm::*;
use tracing::info;
use uuid::Uuid;

use crate::entity::{prediction, result};

/// PostgreSQL-backed rank store.
///
/// Each assignment runs in one transaction that first takes a
/// transaction-scoped advisory lock on the scope, so writers to the same
/// scope are serialized. The unique indexes on `(user_id, rank)`,
/// `(user_id, entry_id)` and the result columns reject anything else.
pub struct DbRankStore {
    db: DatabaseConnection,
}

impl DbRankStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn store_err(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Conflict(detail),
        _ => StoreError::Backend(err.to_string()),
    }
}

async fn lock_scope(txn: &DatabaseTransaction, scope: RankScope) -> Result<(), DbErr> {
    txn.execute_raw(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_xact_lock($1)",
        [scope.lock_key().into()],
    ))
    .await?;
    Ok(())
}

/// Returns the entry that lost the rank, if any.
async fn assign_prediction(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    entry_id: i32,
    rank: i32,
) -> Result<Option<i32>, DbErr> {
    let for_entry = prediction::Entity::find()
        .filter(prediction::Column::UserId.eq(user_id))
        .filter(prediction::Column::EntryId.eq(entry_id))
        .one(txn)
        .await?;
    let for_rank = prediction::Entity::find()
        .filter(prediction::Column::UserId.eq(user_id))
        .filter(prediction::Column::Rank.eq(rank))
        .one(txn)
        .await?;

    let plan = plan_assignment(
        for_entry.as_ref().map(|p| p.id),
        for_rank.as_ref().map(|p| p.id),
    );

    let mut evicted_entry = None;
    if let Some(id) = plan.evict {
        prediction::Entity::delete_by_id(id).exec(txn).await?;
        evicted_entry = for_rank.map(|p| p.entry_id);
    }

    let now = Utc::now();
    match (plan.write, for_entry) {
        (RankWrite::Update(_), Some(existing)) => {
            let mut active: prediction::ActiveModel = existing.into();
            active.rank = Set(rank);
            active.updated_at = Set(now);
            active.update(txn).await?;
        }
        _ => {
            prediction::ActiveModel {
                user_id: Set(user_id),
                entry_id: Set(entry_id),
                rank: Set(rank),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await?;
        }
    }

    Ok(evicted_entry)
}

/// Returns the entry that lost the rank, if any.
async fn assign_result(
    txn: &DatabaseTransaction,
    entry_id: i32,
    rank: i32,
) -> Result<Option<i32>, DbErr> {
    let for_entry = result::Entity::find()
        .filter(result::Column::EntryId.eq(entry_id))
        .one(txn)
        .await?;
    let for_rank = result::Entity::find()
        .filter(result::Column::Rank.eq(rank))
        .one(txn)
        .await?;

    let plan = plan_assignment(
        for_entry.as_ref().map(|r| r.id),
        for_rank.as_ref().map(|r| r.id),
    );

    let mut evicted_entry = None;
    if let Some(id) = plan.evict {
        result::Entity::delete_by_id(id).exec(txn).await?;
        evicted_entry = for_rank.map(|r| r.entry_id);
    }

    let now = Utc::now();
    match (plan.write, for_entry) {
        (RankWrite::Update(_), Some(existing)) => {
            let mut active: result::ActiveModel = existing.into();
            active.rank = Set(rank);
            active.updated_at = Set(now);
            active.update(txn).await?;
        }
        _ => {
            result::ActiveModel {
                entry_id: Set(entry_id),
                rank: Set(rank),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await?;
        }
    }

    Ok(evicted_entry)
}

#[async_trait]
impl RankStore for DbRankStore {
    async fn assign(
        &self,
        scope: RankScope,
        entry_id: i32,
        rank: i32,
    ) -> Result<RankAssignment, StoreError> {
        let txn = self.db.begin().await.map_err(store_err)?;
        lock_scope(&txn, scope).await.map_err(store_err)?;

        let evicted_entry = match scope {
            RankScope::Predictions(user_id) => {
                assign_prediction(&txn, user_id, entry_id, rank).await
            }
            RankScope::Results => assign_result(&txn, entry_id, rank).await,
        }
        .map_err(store_err)?;

        txn.commit().await.map_err(store_err)?;

        if let Some(evicted) = evicted_entry {
            info!(%scope, entry_id, rank, evicted, "Rank taken over from another entry");
        }

        Ok(RankAssignment {
            entry_id,
            rank,
            evicted_entry,
        })
    }

    async fn clear(&self, scope: RankScope, entry_id: i32) -> Result<bool, StoreError> {
        let txn = self.db.begin().await.map_err(store_err)?;
        lock_scope(&txn, scope).await.map_err(store_err)?;

        let res = match scope {
            RankScope::Predictions(user_id) => {
                prediction::Entity::delete_many()
                    .filter(prediction::Column::UserId.eq(user_id))
                    .filter(prediction::Column::EntryId.eq(entry_id))
                    .exec(&txn)
                    .await
            }
            RankScope::Results => {
                result::Entity::delete_many()
                    .filter(result::Column::EntryId.eq(entry_id))
                    .exec(&txn)
                    .await
            }
        }
        .map_err(store_err)?;

        txn.commit().await.map_err(store_err)?;

        Ok(res.rows_affected > 0)
    }

    async fn placements(&self, scope: RankScope) -> Result<Vec<Ranked>, StoreError> {
        let pairs: Vec<(i32, i32)> = match scope {
            RankScope::Predictions(user_id) => {
                prediction::Entity::find()
                    .filter(prediction::Column::UserId.eq(user_id))
                    .order_by_asc(prediction::Column::Rank)
                    .select_only()
                    .column(prediction::Column::EntryId)
                    .column(prediction::Column::Rank)
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
            RankScope::Results => {
                result::Entity::find()
                    .order_by_asc(result::Column::Rank)
                    .select_only()
                    .column(result::Column::EntryId)
                    .column(result::Column::Rank)
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
        }
        .map_err(store_err)?;

        Ok(pairs
            .into_iter()
            .map(|(entry_id, rank)| Ranked::new(entry_id, rank))
            .collect())
    }
}
