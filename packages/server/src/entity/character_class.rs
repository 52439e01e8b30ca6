use charsheet_common::HitDie;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "character_class")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Stored as "d6", "d8", "d10" or "d12".
    pub hit_die: HitDie,

    #[sea_orm(has_many)]
    pub features: HasMany<super::class_feature::Entity>,

    #[sea_orm(has_many)]
    pub characters: HasMany<super::character::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
