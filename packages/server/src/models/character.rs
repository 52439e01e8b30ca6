use charsheet_common::{Ability, Background, CharacterClass, Species, ability_modifier};
use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::character;
use crate::error::AppError;
use crate::repository::CatalogRefs;

use super::shared::{lenient_string, parse_level, parse_non_negative, parse_uuid, validate_json};

/// Ability scores as sent by the client. Each value may be a JSON string or
/// a JSON number.
#[derive(Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScoresInput {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "16")]
    pub strength: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dexterity: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub constitution: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub intelligence: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub wisdom: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub charisma: Option<String>,
}

#[derive(Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Aria")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub species_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub background_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_id: Option<String>,
    #[serde(flatten)]
    pub scores: AbilityScoresInput,
}

#[derive(Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacterRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub species_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub background_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "3")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub temporary_hp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub current_hp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub max_hp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub speed: Option<String>,
    #[serde(flatten)]
    pub scores: AbilityScoresInput,
    /// Stored verbatim.
    #[serde(default, deserialize_with = "lenient_string")]
    pub coins: Option<String>,
    /// Stored verbatim.
    #[serde(default, deserialize_with = "lenient_string")]
    pub items: Option<String>,
    /// Stored verbatim.
    #[serde(default, deserialize_with = "lenient_string")]
    pub details: Option<String>,
}

#[derive(Deserialize, Default, ToSchema)]
pub struct UpdateInventoryRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = r#"{"platinum":0,"gold":150,"electrum":0,"silver":25,"copper":0}"#)]
    pub coins: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "[]")]
    pub items: Option<String>,
}

#[derive(Deserialize, Default, ToSchema)]
pub struct UpdateDetailsRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "{}")]
    pub details: Option<String>,
}

#[derive(Deserialize, Default, ToSchema)]
pub struct UpdateSkillsRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "[]")]
    pub skills: Option<String>,
}

#[derive(Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassActionsRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "[]")]
    pub class_actions: Option<String>,
}

#[derive(Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpellSlotsRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "[]")]
    pub spell_slots: Option<String>,
}

#[derive(Deserialize, Default, ToSchema)]
pub struct UpdateSpellsRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "[]")]
    pub spells: Option<String>,
}

#[derive(Deserialize, Default, ToSchema)]
pub struct UpdateWeaponsRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "[]")]
    pub weapons: Option<String>,
}

/// A character with its catalog records embedded and modifiers derived.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    pub id: i32,
    pub name: String,
    pub species: Species,
    pub background: Background,
    pub character_class: CharacterClass,
    pub level: i32,
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
    pub strength_modifier: i32,
    pub dexterity_modifier: i32,
    pub constitution_modifier: i32,
    pub intelligence_modifier: i32,
    pub wisdom_modifier: i32,
    pub charisma_modifier: i32,
    pub coins: String,
    pub items: String,
    pub details: String,
    pub skills: String,
    pub class_actions: String,
    pub spell_slots: String,
    pub spells: String,
    pub weapons: String,
    pub created_at: DateTime<Utc>,
}

impl CharacterResponse {
    pub fn new(m: character::Model, refs: CatalogRefs) -> Self {
        Self {
            id: m.id,
            name: m.name,
            species: refs.species,
            background: refs.background,
            character_class: refs.class,
            level: m.level,
            temporary_hp: m.temporary_hp,
            current_hp: m.current_hp,
            max_hp: m.max_hp,
            speed: m.speed,
            strength: m.strength,
            dexterity: m.dexterity,
            constitution: m.constitution,
            intelligence: m.intelligence,
            wisdom: m.wisdom,
            charisma: m.charisma,
            strength_modifier: ability_modifier(m.strength),
            dexterity_modifier: ability_modifier(m.dexterity),
            constitution_modifier: ability_modifier(m.constitution),
            intelligence_modifier: ability_modifier(m.intelligence),
            wisdom_modifier: ability_modifier(m.wisdom),
            charisma_modifier: ability_modifier(m.charisma),
            coins: m.coins,
            items: m.items,
            details: m.details,
            skills: m.skills,
            class_actions: m.class_actions,
            spell_slots: m.spell_slots,
            spells: m.spells,
            weapons: m.weapons,
            created_at: m.created_at,
        }
    }
}

/// Catalog ids parsed from a request, not yet resolved against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogIds {
    pub species_id: Uuid,
    pub background_id: Uuid,
    pub class_id: Uuid,
}

/// Parsed ability scores; `None` means "not sent".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AbilityScores {
    pub strength: Option<i32>,
    pub dexterity: Option<i32>,
    pub constitution: Option<i32>,
    pub intelligence: Option<i32>,
    pub wisdom: Option<i32>,
    pub charisma: Option<i32>,
}

impl AbilityScores {
    pub fn apply(&self, active: &mut character::ActiveModel) {
        if let Some(v) = self.strength {
            active.strength = Set(v);
        }
        if let Some(v) = self.dexterity {
            active.dexterity = Set(v);
        }
        if let Some(v) = self.constitution {
            active.constitution = Set(v);
        }
        if let Some(v) = self.intelligence {
            active.intelligence = Set(v);
        }
        if let Some(v) = self.wisdom {
            active.wisdom = Set(v);
        }
        if let Some(v) = self.charisma {
            active.charisma = Set(v);
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ValidCreateCharacter {
    pub name: String,
    pub ids: CatalogIds,
    pub scores: AbilityScores,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ValidUpdateCharacter {
    pub name: String,
    pub ids: CatalogIds,
    pub scores: AbilityScores,
    pub level: Option<i32>,
    pub temporary_hp: Option<i32>,
    pub current_hp: Option<i32>,
    pub max_hp: Option<i32>,
    pub speed: Option<i32>,
    pub coins: Option<String>,
    pub items: Option<String>,
    pub details: Option<String>,
}

impl ValidUpdateCharacter {
    /// Copy every accepted field onto an existing row.
    pub fn apply(self, active: &mut character::ActiveModel) {
        active.name = Set(self.name);
        active.species_id = Set(self.ids.species_id);
        active.background_id = Set(self.ids.background_id);
        active.class_id = Set(self.ids.class_id);
        if let Some(v) = self.level {
            active.level = Set(v);
        }
        if let Some(v) = self.temporary_hp {
            active.temporary_hp = Set(v);
        }
        if let Some(v) = self.current_hp {
            active.current_hp = Set(v);
        }
        if let Some(v) = self.max_hp {
            active.max_hp = Set(v);
        }
        if let Some(v) = self.speed {
            active.speed = Set(v);
        }
        self.scores.apply(active);
        if let Some(v) = self.coins {
            active.coins = Set(v);
        }
        if let Some(v) = self.items {
            active.items = Set(v);
        }
        if let Some(v) = self.details {
            active.details = Set(v);
        }
    }
}

fn validate_name(name: Option<String>) -> Result<String, AppError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(AppError::Validation("Character name cannot be empty".into())),
    }
}

fn validate_catalog_ids(
    species_id: Option<&str>,
    background_id: Option<&str>,
    class_id: Option<&str>,
) -> Result<CatalogIds, AppError> {
    let species_id =
        species_id.ok_or_else(|| AppError::Validation("Species ID cannot be null".into()))?;
    let background_id = background_id
        .ok_or_else(|| AppError::Validation("Background ID cannot be null".into()))?;
    let class_id =
        class_id.ok_or_else(|| AppError::Validation("Class ID cannot be null".into()))?;

    Ok(CatalogIds {
        species_id: parse_uuid("speciesId", species_id)?,
        background_id: parse_uuid("backgroundId", background_id)?,
        class_id: parse_uuid("classId", class_id)?,
    })
}

fn parse_optional(label: &str, raw: Option<&str>) -> Result<Option<i32>, AppError> {
    raw.map(|raw| parse_non_negative(label, raw)).transpose()
}

fn validate_scores(input: &AbilityScoresInput) -> Result<AbilityScores, AppError> {
    Ok(AbilityScores {
        strength: parse_optional(Ability::Strength.label(), input.strength.as_deref())?,
        dexterity: parse_optional(Ability::Dexterity.label(), input.dexterity.as_deref())?,
        constitution: parse_optional(
            Ability::Constitution.label(),
            input.constitution.as_deref(),
        )?,
        intelligence: parse_optional(
            Ability::Intelligence.label(),
            input.intelligence.as_deref(),
        )?,
        wisdom: parse_optional(Ability::Wisdom.label(), input.wisdom.as_deref())?,
        charisma: parse_optional(Ability::Charisma.label(), input.charisma.as_deref())?,
    })
}

pub fn validate_create_character(
    req: CreateCharacterRequest,
) -> Result<ValidCreateCharacter, AppError> {
    let ids = validate_catalog_ids(
        req.species_id.as_deref(),
        req.background_id.as_deref(),
        req.class_id.as_deref(),
    );
    let name = validate_name(req.name)?;
    Ok(ValidCreateCharacter {
        name,
        ids: ids?,
        scores: validate_scores(&req.scores)?,
    })
}

pub fn validate_update_character(
    req: UpdateCharacterRequest,
) -> Result<ValidUpdateCharacter, AppError> {
    let ids = validate_catalog_ids(
        req.species_id.as_deref(),
        req.background_id.as_deref(),
        req.class_id.as_deref(),
    );
    let name = validate_name(req.name)?;
    let ids = ids?;

    Ok(ValidUpdateCharacter {
        name,
        ids,
        level: req.level.as_deref().map(parse_level).transpose()?,
        temporary_hp: parse_optional("Temporary HP", req.temporary_hp.as_deref())?,
        current_hp: parse_optional("Current HP", req.current_hp.as_deref())?,
        max_hp: parse_optional("Maximum HP", req.max_hp.as_deref())?,
        speed: parse_optional("Speed", req.speed.as_deref())?,
        scores: validate_scores(&req.scores)?,
        coins: req.coins,
        items: req.items,
        details: req.details,
    })
}

/// JSON document columns writable through the narrow patch endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonField {
    Coins,
    Items,
    Details,
    Skills,
    ClassActions,
    SpellSlots,
    Spells,
    Weapons,
}

impl JsonField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Coins => "coins",
            Self::Items => "items",
            Self::Details => "details",
            Self::Skills => "skills",
            Self::ClassActions => "class actions",
            Self::SpellSlots => "spell slots",
            Self::Spells => "spells",
            Self::Weapons => "weapons",
        }
    }

    fn set(&self, active: &mut character::ActiveModel, value: String) {
        match self {
            Self::Coins => active.coins = Set(value),
            Self::Items => active.items = Set(value),
            Self::Details => active.details = Set(value),
            Self::Skills => active.skills = Set(value),
            Self::ClassActions => active.class_actions = Set(value),
            Self::SpellSlots => active.spell_slots = Set(value),
            Self::Spells => active.spells = Set(value),
            Self::Weapons => active.weapons = Set(value),
        }
    }
}

/// Validated JSON document updates. Absent fields are left out.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct JsonPatch(Vec<(JsonField, String)>);

impl JsonPatch {
    /// Validate every present field; the first syntax error rejects the
    /// whole patch.
    pub fn validate(fields: Vec<(JsonField, Option<String>)>) -> Result<Self, AppError> {
        let mut accepted = Vec::with_capacity(fields.len());
        for (field, value) in fields {
            if let Some(value) = value {
                validate_json(field.label(), &value)?;
                accepted.push((field, value));
            }
        }
        Ok(Self(accepted))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> Vec<JsonField> {
        self.0.iter().map(|(field, _)| *field).collect()
    }

    pub fn apply(self, active: &mut character::ActiveModel) {
        for (field, value) in self.0 {
            field.set(active, value);
        }
    }
}

impl From<UpdateInventoryRequest> for Vec<(JsonField, Option<String>)> {
    fn from(req: UpdateInventoryRequest) -> Self {
        vec![(JsonField::Coins, req.coins), (JsonField::Items, req.items)]
    }
}

impl From<UpdateDetailsRequest> for Vec<(JsonField, Option<String>)> {
    fn from(req: UpdateDetailsRequest) -> Self {
        vec![(JsonField::Details, req.details)]
    }
}

impl From<UpdateSkillsRequest> for Vec<(JsonField, Option<String>)> {
    fn from(req: UpdateSkillsRequest) -> Self {
        vec![(JsonField::Skills, req.skills)]
    }
}

impl From<UpdateClassActionsRequest> for Vec<(JsonField, Option<String>)> {
    fn from(req: UpdateClassActionsRequest) -> Self {
        vec![(JsonField::ClassActions, req.class_actions)]
    }
}

impl From<UpdateSpellSlotsRequest> for Vec<(JsonField, Option<String>)> {
    fn from(req: UpdateSpellSlotsRequest) -> Self {
        vec![(JsonField::SpellSlots, req.spell_slots)]
    }
}

impl From<UpdateSpellsRequest> for Vec<(JsonField, Option<String>)> {
    fn from(req: UpdateSpellsRequest) -> Self {
        vec![(JsonField::Spells, req.spells)]
    }
}

impl From<UpdateWeaponsRequest> for Vec<(JsonField, Option<String>)> {
    fn from(req: UpdateWeaponsRequest) -> Self {
        vec![(JsonField::Weapons, req.weapons)]
    }
}
