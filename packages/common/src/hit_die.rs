#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hit die rolled by a class per level.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum HitDie {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "d6"))]
    D6,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "d8"))]
    D8,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "d10"))]
    D10,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "d12"))]
    D12,
}

impl HitDie {
    pub const ALL: &'static [HitDie] = &[Self::D6, Self::D8, Self::D10, Self::D12];

    /// Hit die granted by a class, derived from its name.
    pub fn for_class(name: &str) -> Self {
        match name {
            "Fighter" | "Paladin" | "Ranger" => Self::D10,
            "Wizard" | "Sorcerer" => Self::D6,
            _ => Self::D8,
        }
    }

    pub fn sides(&self) -> u8 {
        match self {
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D6 => "d6",
            Self::D8 => "d8",
            Self::D10 => "d10",
            Self::D12 => "d12",
        }
    }
}

impl fmt::Display for HitDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid hit die string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHitDieError {
    invalid: String,
}

impl fmt::Display for ParseHitDieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid hit die '{}'", self.invalid)
    }
}

impl std::error::Error for ParseHitDieError {}

impl FromStr for HitDie {
    type Err = ParseHitDieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|die| die.as_str() == s)
            .ok_or_else(|| ParseHitDieError {
                invalid: s.to_string(),
            })
    }
}
