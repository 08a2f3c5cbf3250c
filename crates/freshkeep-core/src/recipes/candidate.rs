//! Recipe candidates, scored results and household detail views.

use serde::{Deserialize, Serialize};

use super::scorer::names_match;

fn default_unit() -> String {
    "as needed".into()
}

fn default_amount() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ingredient {
    pub name: String,
    #[serde(default = "default_amount")]
    pub amount: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

impl Ingredient {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: default_amount(),
            unit: default_unit(),
        }
    }
}

fn default_ready_in_minutes() -> u32 {
    30
}

fn default_servings() -> u32 {
    4
}

/// A recipe offered by a [`super::RecipeSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeCandidate {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    pub ingredients: Vec<Ingredient>,
    #[serde(default = "default_ready_in_minutes")]
    pub ready_in_minutes: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// A candidate with its score against a household's ingredients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: RecipeCandidate,
    pub score: u32,
    /// Expiring ingredient names this recipe would use up
    pub uses_expiring: Vec<String>,
    pub missing_ingredients_count: usize,
    pub used_ingredients_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub have_it: bool,
}

/// Full recipe view marking which ingredients the household already has.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub summary: String,
    pub instructions: String,
    pub ingredients: Vec<DetailIngredient>,
}

impl RecipeDetail {
    pub fn for_household(recipe: &RecipeCandidate, available: &[String]) -> Self {
        let ingredients = recipe
            .ingredients
            .iter()
            .map(|ingredient| DetailIngredient {
                name: ingredient.name.clone(),
                amount: ingredient.amount,
                unit: ingredient.unit.clone(),
                have_it: available.iter().any(|name| names_match(name, &ingredient.name)),
            })
            .collect();

        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
            summary: format!("A delicious recipe for {}.", recipe.title),
            instructions: recipe
                .instructions
                .clone()
                .unwrap_or_else(|| "Follow traditional preparation method.".to_string()),
            ingredients,
        }
    }

    pub fn missing(&self) -> impl Iterator<Item = &DetailIngredient> {
        self.ingredients.iter().filter(|i| !i.have_it)
    }
}
