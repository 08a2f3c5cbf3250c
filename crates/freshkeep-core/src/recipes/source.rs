//! Recipe source collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::candidate::RecipeCandidate;
use super::scorer::ScoringVariant;
use crate::error::{Result, ValidationError};

/// Where candidates come from. Decides the scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Remote,
    LocalCatalog,
}

impl SourceKind {
    pub fn scoring_variant(&self) -> ScoringVariant {
        match self {
            SourceKind::Remote => ScoringVariant::Remote,
            SourceKind::LocalCatalog => ScoringVariant::LocalCatalog,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Remote => "remote",
            SourceKind::LocalCatalog => "local_catalog",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "remote" => Ok(SourceKind::Remote),
            "local_catalog" | "local" => Ok(SourceKind::LocalCatalog),
            _ => Err(ValidationError::UnknownValue {
                field: "source",
                value: s.to_string(),
            }),
        }
    }
}

/// Supplies recipe candidates for a set of ingredient names.
pub trait RecipeSource {
    fn kind(&self) -> SourceKind;

    fn candidates(&self, ingredients: &[String]) -> Result<Vec<RecipeCandidate>>;
}

/// A fixed candidate list, e.g. the saved response of a remote search.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSource {
    kind: SourceKind,
    recipes: Vec<RecipeCandidate>,
}

impl FixedSource {
    pub fn new(kind: SourceKind, recipes: Vec<RecipeCandidate>) -> Self {
        Self { kind, recipes }
    }
}

impl RecipeSource for FixedSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn candidates(&self, _ingredients: &[String]) -> Result<Vec<RecipeCandidate>> {
        Ok(self.recipes.clone())
    }
}
