use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "background_feature")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub position: i32,

    pub background_id: Uuid,
    #[sea_orm(belongs_to, from = "background_id", to = "id", on_delete = "Cascade")]
    pub background: HasOne<super::background::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
