use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEVEL: i32 = 1;
pub const DEFAULT_COINS: &str = r#"{"platinum":0,"gold":0,"electrum":0,"silver":0,"copper":0}"#;
pub const DEFAULT_ITEMS: &str = "[]";
pub const DEFAULT_DETAILS: &str = "{}";
pub const DEFAULT_SKILLS: &str = "[]";
pub const DEFAULT_CLASS_ACTIONS: &str = "[]";
pub const DEFAULT_SPELL_SLOTS: &str = "[]";
pub const DEFAULT_SPELLS: &str = "[]";
pub const DEFAULT_WEAPONS: &str = "[]";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "character")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub species_id: Uuid,
    #[sea_orm(belongs_to, from = "species_id", to = "id")]
    pub species: HasOne<super::species::Entity>,

    pub background_id: Uuid,
    #[sea_orm(belongs_to, from = "background_id", to = "id")]
    pub background: HasOne<super::background::Entity>,

    pub class_id: Uuid,
    #[sea_orm(belongs_to, from = "class_id", to = "id")]
    pub class: HasOne<super::character_class::Entity>,

    pub level: i32, // 1..=20
    pub temporary_hp: i32,
    pub current_hp: i32,
    pub max_hp: i32,
    pub speed: i32,

    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,

    // Free-form JSON documents, stored verbatim.
    #[sea_orm(column_type = "Text")]
    pub coins: String,
    #[sea_orm(column_type = "Text")]
    pub items: String,
    #[sea_orm(column_type = "Text")]
    pub details: String,
    #[sea_orm(column_type = "Text")]
    pub skills: String,
    #[sea_orm(column_type = "Text")]
    pub class_actions: String,
    #[sea_orm(column_type = "Text")]
    pub spell_slots: String,
    #[sea_orm(column_type = "Text")]
    pub spells: String,
    #[sea_orm(column_type = "Text")]
    pub weapons: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

/// A new character row with every optional column at its default.
pub fn new_active_model(
    name: String,
    species_id: Uuid,
    background_id: Uuid,
    class_id: Uuid,
) -> ActiveModel {
    ActiveModel {
        name: Set(name),
        species_id: Set(species_id),
        background_id: Set(background_id),
        class_id: Set(class_id),
        level: Set(DEFAULT_LEVEL),
        temporary_hp: Set(0),
        current_hp: Set(0),
        max_hp: Set(0),
        speed: Set(0),
        strength: Set(0),
        dexterity: Set(0),
        constitution: Set(0),
        intelligence: Set(0),
        wisdom: Set(0),
        charisma: Set(0),
        coins: Set(DEFAULT_COINS.to_string()),
        items: Set(DEFAULT_ITEMS.to_string()),
        details: Set(DEFAULT_DETAILS.to_string()),
        skills: Set(DEFAULT_SKILLS.to_string()),
        class_actions: Set(DEFAULT_CLASS_ACTIONS.to_string()),
        spell_slots: Set(DEFAULT_SPELL_SLOTS.to_string()),
        spells: Set(DEFAULT_SPELLS.to_string()),
        weapons: Set(DEFAULT_WEAPONS.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
}
