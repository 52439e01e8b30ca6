use serde::Serialize;
use uuid::Uuid;

use super::{Catalog, CatalogError, CatalogKind, FeatureRow, lookup, table_names};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundFeature {
    pub id: Uuid,
    #[serde(skip)]
    pub background_id: Uuid,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub features: Vec<BackgroundFeature>,
}

impl Catalog for Background {
    const KIND: CatalogKind = CatalogKind::Background;

    fn names() -> Vec<&'static str> {
        table_names(BACKGROUND_FEATURES)
    }

    fn instantiate(name: &str) -> Result<Self, CatalogError> {
        let rows = lookup(BACKGROUND_FEATURES, Self::KIND, name)?;
        let id = Uuid::new_v4();
        let features = rows
            .iter()
            .map(|(title, description)| BackgroundFeature {
                id: Uuid::new_v4(),
                background_id: id,
                title: (*title).to_string(),
                description: (*description).to_string(),
            })
            .collect();

        Ok(Self {
            id,
            name: name.to_string(),
            description: None,
            features,
        })
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn child_count(&self) -> usize {
        self.features.len()
    }
}

const BACKGROUND_FEATURES: &[(&str, &[FeatureRow])] = &[
    (
        "Acolyte",
        &[
            (
                "Skill Proficiencies",
                "Insight, Religion",
            ),
            (
                "Tool Proficiencies",
                "Calligrapher's Supplies",
            ),
            (
                "Feat",
                "Magic initiate(Cleric)",
            ),
            (
                "Equipment",
                "Choose A or B: (A) Calligrapher's Supplies, Book (prayers), Holy Symbol, Parchment (10 sheets), Robe, 8 GP; or (B) 50 GP",
            ),
            (
                "Ability Scores",
                "Intelligence, Wisdom, Charisma",
            ),
        ],
    ),
    (
        "Criminal",
        &[
            (
                "Equipment",
                "Choose A or B: (A) 2 Daggers, Thieves’ Tools, Crowbar, 2 Pouches, Traveler’s Clothes, 16 GP; or (B) 50 GP",
            ),
            (
                "Ability Scores",
                "Dexterity, Constitution, Intelligence",
            ),
            (
                "Feat",
                "Alert",
            ),
        ],
    ),
];
