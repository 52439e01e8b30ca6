//! Static catalog definitions and the records instantiated from them.
//!
//! Each catalog maps a name to an ordered list of feature definitions. Records
//! built by [`Catalog::instantiate`] always carry fresh identifiers, and every
//! child points back at the parent created in the same call.

mod background;
mod class;
mod species;

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

pub use background::{Background, BackgroundFeature};
pub use class::{CharacterClass, ClassFeature};
pub use species::{Species, Trait};

/// The three catalogs a character draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Species,
    Background,
    Class,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Species => "species",
            Self::Background => "background",
            Self::Class => "class",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown {kind}: {name}")]
    UnknownName { kind: CatalogKind, name: String },
}

/// A named catalog record with owned child features.
pub trait Catalog: Sized {
    const KIND: CatalogKind;

    /// Names defined by the static table, in declaration order.
    fn names() -> Vec<&'static str>;

    /// Build a fresh record (new ids, children wired to the new parent).
    fn instantiate(name: &str) -> Result<Self, CatalogError>;

    fn id(&self) -> Uuid;

    fn name(&self) -> &str;

    /// Number of owned child features/traits.
    fn child_count(&self) -> usize;
}

/// Title and description of a species trait or background feature.
pub(crate) type FeatureRow = (&'static str, &'static str);

fn lookup<'a, T>(
    table: &'a [(&'static str, T)],
    kind: CatalogKind,
    name: &str,
) -> Result<&'a T, CatalogError> {
    table
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, definition)| definition)
        .ok_or_else(|| CatalogError::UnknownName {
            kind,
            name: name.to_string(),
        })
}

fn table_names<T>(table: &[(&'static str, T)]) -> Vec<&'static str> {
    table.iter().map(|(name, _)| *name).collect()
}
