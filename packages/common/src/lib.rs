pub mod ability;
pub mod catalog;
pub mod hit_die;

pub use ability::{Ability, ability_modifier};
pub use catalog::{
    Background, BackgroundFeature, Catalog, CatalogError, CatalogKind, CharacterClass,
    ClassFeature, Species, Trait,
};
pub use hit_die::HitDie;
