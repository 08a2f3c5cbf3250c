//! Item classification enums: category, storage location and expiration mode.
//!
//! Each enum has a strict `FromStr` (unknown values are `InvalidInput`) and a
//! `parse_lenient` constructor carrying the named fallback rule used where
//! free-form strings arrive from adapters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Food category of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dairy,
    Meat,
    Poultry,
    Fish,
    Vegetables,
    Fruits,
    Bread,
    Eggs,
    Frozen,
    Canned,
    Condiments,
    Beverages,
    Snacks,
    Grains,
    Other,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Dairy,
        Category::Meat,
        Category::Poultry,
        Category::Fish,
        Category::Vegetables,
        Category::Fruits,
        Category::Bread,
        Category::Eggs,
        Category::Frozen,
        Category::Canned,
        Category::Condiments,
        Category::Beverages,
        Category::Snacks,
        Category::Grains,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Poultry => "poultry",
            Category::Fish => "fish",
            Category::Vegetables => "vegetables",
            Category::Fruits => "fruits",
            Category::Bread => "bread",
            Category::Eggs => "eggs",
            Category::Frozen => "frozen",
            Category::Canned => "canned",
            Category::Condiments => "condiments",
            Category::Beverages => "beverages",
            Category::Snacks => "snacks",
            Category::Grains => "grains",
            Category::Other => "other",
        }
    }

    /// Shelf-stable categories whose shelf life already assumes pantry storage.
    pub fn is_pantry_native(&self) -> bool {
        matches!(
            self,
            Category::Canned | Category::Grains | Category::Snacks | Category::Condiments
        )
    }

    /// Unknown category strings fall back to [`Category::Other`].
    pub fn parse_lenient(value: &str) -> Category {
        value.parse().unwrap_or_else(|_| {
            tracing::trace!(category = value, "unknown category, using 'other' policy");
            Category::Other
        })
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "category",
                value: s.to_string(),
            })
    }
}

/// Where an item is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageLocation {
    Fridge,
    Freezer,
    Pantry,
}

impl StorageLocation {
    pub const ALL: [StorageLocation; 3] = [
        StorageLocation::Fridge,
        StorageLocation::Freezer,
        StorageLocation::Pantry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageLocation::Fridge => "fridge",
            StorageLocation::Freezer => "freezer",
            StorageLocation::Pantry => "pantry",
        }
    }

    /// Unknown storage strings get the fridge rule (no shelf-life adjustment).
    pub fn parse_lenient(value: &str) -> StorageLocation {
        value.parse().unwrap_or(StorageLocation::Fridge)
    }
}

impl Default for StorageLocation {
    fn default() -> Self {
        StorageLocation::Fridge
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageLocation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fridge" => Ok(StorageLocation::Fridge),
            "freezer" => Ok(StorageLocation::Freezer),
            "pantry" => Ok(StorageLocation::Pantry),
            _ => Err(ValidationError::UnknownValue {
                field: "storage",
                value: s.to_string(),
            }),
        }
    }
}

/// How aggressively shelf life is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationMode {
    Conservative,
    Standard,
    Optimistic,
}

impl ExpirationMode {
    /// Multiplier applied to the storage-adjusted shelf life.
    pub fn multiplier(&self) -> f64 {
        match self {
            ExpirationMode::Conservative => 0.7,
            ExpirationMode::Standard => 1.0,
            ExpirationMode::Optimistic => 1.3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpirationMode::Conservative => "conservative",
            ExpirationMode::Standard => "standard",
            ExpirationMode::Optimistic => "optimistic",
        }
    }

    /// Unknown mode strings fall back to [`ExpirationMode::Standard`].
    pub fn parse_lenient(value: &str) -> ExpirationMode {
        value.parse().unwrap_or(ExpirationMode::Standard)
    }
}

impl Default for ExpirationMode {
    fn default() -> Self {
        ExpirationMode::Standard
    }
}

impl fmt::Display for ExpirationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpirationMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(ExpirationMode::Conservative),
            "standard" => Ok(ExpirationMode::Standard),
            "optimistic" => Ok(ExpirationMode::Optimistic),
            _ => Err(ValidationError::UnknownValue {
                field: "mode",
                value: s.to_string(),
            }),
        }
    }
}
