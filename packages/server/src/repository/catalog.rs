use std::collections::HashMap;

use async_trait::async_trait;
use charsheet_common::{
    Background, BackgroundFeature, Catalog, CharacterClass, ClassFeature, Species, Trait,
};
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{
    background, background_feature, character, character_class, class_feature, species,
    species_trait,
};

/// Persistence for catalog records and their owned children.
///
/// `save` writes the parent and replaces its children in one transaction.
/// Every read materializes the child collection, ordered as defined.
#[async_trait]
pub trait CatalogStore: Catalog + Send + Sync + Sized + 'static {
    async fn count(db: &DatabaseConnection) -> Result<u64, DbErr>;

    /// Insert the record, or update it and replace its children if the id exists.
    async fn save(db: &DatabaseConnection, record: Self) -> Result<Self, DbErr>;

    /// All records ordered by name.
    async fn find_all_with_children(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr>;

    /// `Ok(None)` when no record has this id.
    async fn find_by_id_with_children(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<Self>, DbErr>;

    /// First record in store iteration order (by name).
    async fn find_first(db: &DatabaseConnection) -> Result<Option<Self>, DbErr>;

    /// Delete the record and its children. Returns `false` when the id is unknown.
    async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, DbErr>;
}

fn group_by_parent<M>(rows: Vec<M>, parent: impl Fn(&M) -> Uuid) -> HashMap<Uuid, Vec<M>> {
    let mut grouped: HashMap<Uuid, Vec<M>> = HashMap::new();
    for row in rows {
        grouped.entry(parent(&row)).or_default().push(row);
    }
    grouped
}

fn position(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

fn species_record(model: species::Model, traits: Vec<species_trait::Model>) -> Species {
    Species {
        id: model.id,
        name: model.name,
        traits: traits
            .into_iter()
            .map(|t| Trait {
                id: t.id,
                species_id: t.species_id,
                title: t.title,
                description: t.description,
            })
            .collect(),
    }
}

fn background_record(
    model: background::Model,
    features: Vec<background_feature::Model>,
) -> Background {
    Background {
        id: model.id,
        name: model.name,
        description: model.description,
        features: features
            .into_iter()
            .map(|f| BackgroundFeature {
                id: f.id,
                background_id: f.background_id,
                title: f.title,
                description: f.description,
            })
            .collect(),
    }
}

fn class_record(
    model: character_class::Model,
    features: Vec<class_feature::Model>,
) -> CharacterClass {
    CharacterClass {
        id: model.id,
        name: model.name,
        description: model.description,
        hit_die: model.hit_die,
        features: features
            .into_iter()
            .map(|f| ClassFeature {
                id: f.id,
                class_id: f.class_id,
                title: f.title,
                description: f.description,
                level: f.level,
            })
            .collect(),
    }
}

#[async_trait]
impl CatalogStore for Species {
    async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        species::Entity::find().count(db).await
    }

    async fn save(db: &DatabaseConnection, mut record: Self) -> Result<Self, DbErr> {
        for t in &mut record.traits {
            t.species_id = record.id;
        }

        let txn = db.begin().await?;

        let parent = species::ActiveModel {
            id: Set(record.id),
            name: Set(record.name.clone()),
        };
        if species::Entity::find_by_id(record.id).one(&txn).await?.is_some() {
            parent.update(&txn).await?;
            species_trait::Entity::delete_many()
                .filter(species_trait::Column::SpeciesId.eq(record.id))
                .exec(&txn)
                .await?;
        } else {
            parent.insert(&txn).await?;
        }

        if !record.traits.is_empty() {
            let rows = record
                .traits
                .iter()
                .enumerate()
                .map(|(i, t)| species_trait::ActiveModel {
                    id: Set(t.id),
                    title: Set(t.title.clone()),
                    description: Set(t.description.clone()),
                    position: Set(position(i)),
                    species_id: Set(record.id),
                });
            species_trait::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(record)
    }

    async fn find_all_with_children(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        let parents = species::Entity::find()
            .order_by_asc(species::Column::Name)
            .all(db)
            .await?;
        if parents.is_empty() {
            return Ok(Vec::new());
        }

        let traits = species_trait::Entity::find()
            .filter(species_trait::Column::SpeciesId.is_in(parents.iter().map(|p| p.id)))
            .order_by_asc(species_trait::Column::Position)
            .all(db)
            .await?;
        let mut grouped = group_by_parent(traits, |t| t.species_id);

        Ok(parents
            .into_iter()
            .map(|p| {
                let children = grouped.remove(&p.id).unwrap_or_default();
                species_record(p, children)
            })
            .collect())
    }

    async fn find_by_id_with_children(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<Self>, DbErr> {
        let Some(parent) = species::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let traits = species_trait::Entity::find()
            .filter(species_trait::Column::SpeciesId.eq(id))
            .order_by_asc(species_trait::Column::Position)
            .all(db)
            .await?;
        Ok(Some(species_record(parent, traits)))
    }

    async fn find_first(db: &DatabaseConnection) -> Result<Option<Self>, DbErr> {
        let first = species::Entity::find()
            .order_by_asc(species::Column::Name)
            .one(db)
            .await?;
        match first {
            Some(p) => Self::find_by_id_with_children(db, p.id).await,
            None => Ok(None),
        }
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, DbErr> {
        let txn = db.begin().await?;
        species_trait::Entity::delete_many()
            .filter(species_trait::Column::SpeciesId.eq(id))
            .exec(&txn)
            .await?;
        let result = species::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl CatalogStore for Background {
    async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        background::Entity::find().count(db).await
    }

    async fn save(db: &DatabaseConnection, mut record: Self) -> Result<Self, DbErr> {
        for f in &mut record.features {
            f.background_id = record.id;
        }

        let txn = db.begin().await?;

        let parent = background::ActiveModel {
            id: Set(record.id),
            name: Set(record.name.clone()),
            description: Set(record.description.clone()),
        };
        if background::Entity::find_by_id(record.id)
            .one(&txn)
            .await?
            .is_some()
        {
            parent.update(&txn).await?;
            background_feature::Entity::delete_many()
                .filter(background_feature::Column::BackgroundId.eq(record.id))
                .exec(&txn)
                .await?;
        } else {
            parent.insert(&txn).await?;
        }

        if !record.features.is_empty() {
            let rows = record
                .features
                .iter()
                .enumerate()
                .map(|(i, f)| background_feature::ActiveModel {
                    id: Set(f.id),
                    title: Set(f.title.clone()),
                    description: Set(f.description.clone()),
                    position: Set(position(i)),
                    background_id: Set(record.id),
                });
            background_feature::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(record)
    }

    async fn find_all_with_children(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        let parents = background::Entity::find()
            .order_by_asc(background::Column::Name)
            .all(db)
            .await?;
        if parents.is_empty() {
            return Ok(Vec::new());
        }

        let features = background_feature::Entity::find()
            .filter(
                background_feature::Column::BackgroundId.is_in(parents.iter().map(|p| p.id)),
            )
            .order_by_asc(background_feature::Column::Position)
            .all(db)
            .await?;
        let mut grouped = group_by_parent(features, |f| f.background_id);

        Ok(parents
            .into_iter()
            .map(|p| {
                let children = grouped.remove(&p.id).unwrap_or_default();
                background_record(p, children)
            })
            .collect())
    }

    async fn find_by_id_with_children(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<Self>, DbErr> {
        let Some(parent) = background::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let features = background_feature::Entity::find()
            .filter(background_feature::Column::BackgroundId.eq(id))
            .order_by_asc(background_feature::Column::Position)
            .all(db)
            .await?;
        Ok(Some(background_record(parent, features)))
    }

    async fn find_first(db: &DatabaseConnection) -> Result<Option<Self>, DbErr> {
        let first = background::Entity::find()
            .order_by_asc(background::Column::Name)
            .one(db)
            .await?;
        match first {
            Some(p) => Self::find_by_id_with_children(db, p.id).await,
            None => Ok(None),
        }
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, DbErr> {
        let txn = db.begin().await?;
        background_feature::Entity::delete_many()
            .filter(background_feature::Column::BackgroundId.eq(id))
            .exec(&txn)
            .await?;
        let result = background::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl CatalogStore for CharacterClass {
    async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        character_class::Entity::find().count(db).await
    }

    async fn save(db: &DatabaseConnection, mut record: Self) -> Result<Self, DbErr> {
        for f in &mut record.features {
            f.class_id = record.id;
        }

        let txn = db.begin().await?;

        let parent = character_class::ActiveModel {
            id: Set(record.id),
            name: Set(record.name.clone()),
            description: Set(record.description.clone()),
            hit_die: Set(record.hit_die),
        };
        if character_class::Entity::find_by_id(record.id)
            .one(&txn)
            .await?
            .is_some()
        {
            parent.update(&txn).await?;
            class_feature::Entity::delete_many()
                .filter(class_feature::Column::ClassId.eq(record.id))
                .exec(&txn)
                .await?;
        } else {
            parent.insert(&txn).await?;
        }

        if !record.features.is_empty() {
            let rows = record
                .features
                .iter()
                .enumerate()
                .map(|(i, f)| class_feature::ActiveModel {
                    id: Set(f.id),
                    title: Set(f.title.clone()),
                    description: Set(f.description.clone()),
                    level: Set(f.level),
                    position: Set(position(i)),
                    class_id: Set(record.id),
                });
            class_feature::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(record)
    }

    async fn find_all_with_children(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        let parents = character_class::Entity::find()
            .order_by_asc(character_class::Column::Name)
            .all(db)
            .await?;
        if parents.is_empty() {
            return Ok(Vec::new());
        }

        let features = class_feature::Entity::find()
            .filter(class_feature::Column::ClassId.is_in(parents.iter().map(|p| p.id)))
            .order_by_asc(class_feature::Column::Position)
            .all(db)
            .await?;
        let mut grouped = group_by_parent(features, |f| f.class_id);

        Ok(parents
            .into_iter()
            .map(|p| {
                let children = grouped.remove(&p.id).unwrap_or_default();
                class_record(p, children)
            })
            .collect())
    }

    async fn find_by_id_with_children(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<Self>, DbErr> {
        let Some(parent) = character_class::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let features = class_feature::Entity::find()
            .filter(class_feature::Column::ClassId.eq(id))
            .order_by_asc(class_feature::Column::Position)
            .all(db)
            .await?;
        Ok(Some(class_record(parent, features)))
    }

    async fn find_first(db: &DatabaseConnection) -> Result<Option<Self>, DbErr> {
        let first = character_class::Entity::find()
            .order_by_asc(character_class::Column::Name)
            .one(db)
            .await?;
        match first {
            Some(p) => Self::find_by_id_with_children(db, p.id).await,
            None => Ok(None),
        }
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, DbErr> {
        let txn = db.begin().await?;
        class_feature::Entity::delete_many()
            .filter(class_feature::Column::ClassId.eq(id))
            .exec(&txn)
            .await?;
        let result = character_class::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

/// The three catalog records a character points at.
#[derive(Clone, Debug)]
pub struct CatalogRefs {
    pub species: Species,
    pub background: Background,
    pub class: CharacterClass,
}

impl CatalogRefs {
    /// Load the records referenced by a stored character. `Ok(None)` if any
    /// of them has disappeared.
    pub async fn load_for(
        db: &DatabaseConnection,
        model: &character::Model,
    ) -> Result<Option<Self>, DbErr> {
        let species = Species::find_by_id_with_children(db, model.species_id).await?;
        let background = Background::find_by_id_with_children(db, model.background_id).await?;
        let class = CharacterClass::find_by_id_with_children(db, model.class_id).await?;
        Ok(match (species, background, class) {
            (Some(species), Some(background), Some(class)) => Some(Self {
                species,
                background,
                class,
            }),
            _ => None,
        })
    }

    /// First record of every catalog, or `None` while any catalog is empty.
    pub async fn first_available(db: &DatabaseConnection) -> Result<Option<Self>, DbErr> {
        let species = Species::find_first(db).await?;
        let background = Background::find_first(db).await?;
        let class = CharacterClass::find_first(db).await?;
        Ok(match (species, background, class) {
            (Some(species), Some(background), Some(class)) => Some(Self {
                species,
                background,
                class,
            }),
            _ => None,
        })
    }
}

/// Every catalog record keyed by id, for assembling many characters at once.
pub struct CatalogIndex {
    species: HashMap<Uuid, Species>,
    backgrounds: HashMap<Uuid, Background>,
    classes: HashMap<Uuid, CharacterClass>,
}

impl CatalogIndex {
    pub async fn load(db: &DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self {
            species: Species::find_all_with_children(db)
                .await?
                .into_iter()
                .map(|s| (s.id, s))
                .collect(),
            backgrounds: Background::find_all_with_children(db)
                .await?
                .into_iter()
                .map(|b| (b.id, b))
                .collect(),
            classes: CharacterClass::find_all_with_children(db)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect(),
        })
    }

    pub fn refs_for(&self, model: &character::Model) -> Option<CatalogRefs> {
        Some(CatalogRefs {
            species: self.species.get(&model.species_id)?.clone(),
            background: self.backgrounds.get(&model.background_id)?.clone(),
            class: self.classes.get(&model.class_id)?.clone(),
        })
    }
}
