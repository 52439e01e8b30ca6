pub mod background;
pub mod background_feature;
pub mod character;
pub mod character_class;
pub mod class_feature;
pub mod species;
pub mod species_trait;
