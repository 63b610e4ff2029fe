use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entry")]
pub struct Model {
    /// Seeded ids are kept as-is.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    pub name: String,
    /// Image reference, e.g. an ISO country code for a flag CDN.
    pub flag_code: String,
    pub artist: Option<String>,
    pub song: Option<String>,

    #[sea_orm(has_many)]
    pub predictions: HasMany<super::prediction::Entity>,

    #[sea_orm(has_one)]
    pub result: HasOne<super::result::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
