use charsheet_common::{Background, CharacterClass, Species};
use sea_orm::*;
use tracing::{error, info, warn};

use crate::config::SeedConfig;
use crate::entity::character;
use crate::repository::{self, CatalogRefs, CatalogStore};

pub const SAMPLE_CHARACTER_NAME: &str = "Tom(Debug Character)";

const SAMPLE_SKILLS: &str = r#"[{"name":"Athletics","ability":"Strength","proficiency":"proficient","other":0},{"name":"Perception","ability":"Wisdom","proficiency":"proficient","other":0},{"name":"Stealth","ability":"Dexterity","proficiency":"none","other":0}]"#;
const SAMPLE_COINS: &str = r#"{"platinum":0,"gold":150,"electrum":0,"silver":25,"copper":0}"#;
const SAMPLE_ITEMS: &str = r#"[{"id":"1","name":"Longsword","description":"A well-crafted longsword","quantity":1,"weight":3.0},{"id":"2","name":"Healing Potion","description":"Restores 2d4+2 hit points","quantity":3,"weight":0.5}]"#;

/// A level 3 character with filled-in stats, skills and inventory.
pub fn sample_character(name: String, refs: &CatalogRefs) -> character::ActiveModel {
    let mut active =
        character::new_active_model(name, refs.species.id, refs.background.id, refs.class.id);
    active.level = Set(3);
    active.temporary_hp = Set(0);
    active.current_hp = Set(25);
    active.max_hp = Set(25);
    active.speed = Set(30);
    active.strength = Set(16);
    active.dexterity = Set(14);
    active.constitution = Set(15);
    active.intelligence = Set(12);
    active.wisdom = Set(13);
    active.charisma = Set(10);
    active.skills = Set(SAMPLE_SKILLS.to_string());
    active.coins = Set(SAMPLE_COINS.to_string());
    active.items = Set(SAMPLE_ITEMS.to_string());
    active
}

/// Fill an empty catalog table from its static definitions.
///
/// Returns the number of records written. A record that fails to build or
/// save is logged and skipped.
pub async fn seed_catalog<T: CatalogStore>(db: &DatabaseConnection) -> u32 {
    let kind = T::KIND;
    let existing = match T::count(db).await {
        Ok(n) => n,
        Err(e) => {
            error!(%kind, error = %e, "Failed to count catalog rows, skipping");
            return 0;
        }
    };
    if existing > 0 {
        info!(%kind, existing, "Catalog already seeded");
        return 0;
    }

    let mut inserted = 0u32;
    for name in T::names() {
        let record = match T::instantiate(name) {
            Ok(record) => record,
            Err(e) => {
                warn!(%kind, name, error = %e, "Skipping catalog entry");
                continue;
            }
        };
        let children = record.child_count();
        match T::save(db, record).await {
            Ok(saved) => {
                inserted += 1;
                info!(%kind, name, id = %saved.id(), children, "Seeded catalog entry");
            }
            Err(e) => error!(%kind, name, error = %e, "Failed to save catalog entry"),
        }
    }

    info!(%kind, inserted, "Seeded catalog");
    inserted
}

/// Seed species, backgrounds and classes, in that order.
pub async fn seed_catalogs(db: &DatabaseConnection) {
    seed_catalog::<Species>(db).await;
    seed_catalog::<Background>(db).await;
    seed_catalog::<CharacterClass>(db).await;
}

/// Create the sample character when no characters exist yet.
///
/// Returns the new character's id, or `None` when nothing was created.
pub async fn seed_sample_character(db: &DatabaseConnection) -> Option<i32> {
    match repository::character::count(db).await {
        Ok(0) => {}
        Ok(_) => {
            info!("Characters already exist, skipping sample character");
            return None;
        }
        Err(e) => {
            error!(error = %e, "Failed to count characters");
            return None;
        }
    }

    let refs = match CatalogRefs::first_available(db).await {
        Ok(Some(refs)) => refs,
        Ok(None) => {
            warn!("Cannot create sample character: missing species, background, or class data");
            return None;
        }
        Err(e) => {
            error!(error = %e, "Failed to load catalogs for sample character");
            return None;
        }
    };

    let active = sample_character(SAMPLE_CHARACTER_NAME.to_string(), &refs);
    match repository::character::insert(db, active).await {
        Ok(model) => {
            info!(id = model.id, "Created sample character");
            Some(model.id)
        }
        Err(e) => {
            error!(error = %e, "Failed to create sample character");
            None
        }
    }
}

/// Startup seeding. Never fails; every problem is logged.
pub async fn run(db: &DatabaseConnection, config: &SeedConfig) {
    seed_catalogs(db).await;
    if config.sample_character {
        seed_sample_character(db).await;
    }
}
