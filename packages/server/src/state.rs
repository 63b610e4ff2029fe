use std::sync::Arc;

use podium_common::RankStore;
use podium_common::identity::AdminPolicy;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::store::DbRankStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub ranks: Arc<dyn RankStore>,
    pub admin: AdminPolicy,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let admin = config.contest.admin_policy();
        Self {
            ranks: Arc::new(DbRankStore::new(db.clone())),
            db,
            config,
            admin,
        }
    }
}
