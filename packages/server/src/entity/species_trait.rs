use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "species_trait")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub position: i32, // order within the owning species

    pub species_id: Uuid,
    #[sea_orm(belongs_to, from = "species_id", to = "id", on_delete = "Cascade")]
    pub species: HasOne<super::species::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
