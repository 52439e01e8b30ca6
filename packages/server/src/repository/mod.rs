//! Store-and-retrieve operations over the relational entities.
//!
//! Catalog records are always returned with their children fully loaded, so
//! handlers can serialize the nested structure directly.

pub mod catalog;
pub mod character;

pub use catalog::{CatalogIndex, CatalogRefs, CatalogStore};
