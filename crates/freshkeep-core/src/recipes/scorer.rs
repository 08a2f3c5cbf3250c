//! Recipe scoring and ranking.
//!
//! ```text
//! score = used × 3 − missing × 2 + (5 if nothing missing) + expiring bonus
//! ```
//!
//! floored at zero. The per-match expiring bonus depends on the source.

use serde::{Deserialize, Serialize};

use super::candidate::{RecipeCandidate, ScoredRecipe};

pub const USED_INGREDIENT_POINTS: i64 = 3;
pub const MISSING_INGREDIENT_PENALTY: i64 = 2;
pub const ZERO_WASTE_BONUS: i64 = 5;

/// Score given to fallback suggestions when nothing matched.
pub const NEUTRAL_SCORE: u32 = 5;

/// Number of fallback suggestions.
pub const FALLBACK_COUNT: usize = 5;

pub const DEFAULT_RESULT_LIMIT: usize = 15;

/// Scoring weights, picked by the kind of source the candidates came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringVariant {
    /// Candidates from an external recipe API
    Remote,
    /// Candidates from the curated built-in catalog
    LocalCatalog,
}

impl ScoringVariant {
    /// Points per expiring ingredient the recipe uses.
    pub fn expiring_bonus(&self) -> i64 {
        match self {
            ScoringVariant::Remote => 10,
            ScoringVariant::LocalCatalog => 15,
        }
    }
}

/// Case-insensitive substring match in either direction. Blank names never match.
pub fn names_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Score one recipe against the household's ingredients.
pub fn score(
    recipe: &RecipeCandidate,
    available: &[String],
    expiring: &[String],
    variant: ScoringVariant,
) -> ScoredRecipe {
    let used = recipe
        .ingredients
        .iter()
        .filter(|ingredient| available.iter().any(|name| names_match(name, &ingredient.name)))
        .count();
    let missing = recipe.ingredients.len() - used;

    let uses_expiring: Vec<String> = expiring
        .iter()
        .filter(|name| {
            recipe
                .ingredients
                .iter()
                .any(|ingredient| names_match(name, &ingredient.name))
        })
        .cloned()
        .collect();

    let mut points =
        used as i64 * USED_INGREDIENT_POINTS - missing as i64 * MISSING_INGREDIENT_PENALTY;
    if missing == 0 {
        points += ZERO_WASTE_BONUS;
    }
    points += uses_expiring.len() as i64 * variant.expiring_bonus();

    ScoredRecipe {
        recipe: recipe.clone(),
        score: points.max(0) as u32,
        uses_expiring,
        missing_ingredients_count: missing,
        used_ingredients_count: used,
    }
}

/// Score every candidate and return the best `limit`, highest first.
///
/// Equal scores keep the candidates' order. When every score is zero the
/// first [`FALLBACK_COUNT`] candidates come back with [`NEUTRAL_SCORE`].
pub fn rank(
    candidates: &[RecipeCandidate],
    available: &[String],
    expiring: &[String],
    variant: ScoringVariant,
    limit: usize,
) -> Vec<ScoredRecipe> {
    let mut scored: Vec<ScoredRecipe> = candidates
        .iter()
        .map(|recipe| score(recipe, available, expiring, variant))
        .collect();

    if scored.iter().all(|s| s.score == 0) {
        return candidates
            .iter()
            .take(FALLBACK_COUNT)
            .map(neutral)
            .collect();
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

fn neutral(recipe: &RecipeCandidate) -> ScoredRecipe {
    ScoredRecipe {
        recipe: recipe.clone(),
        score: NEUTRAL_SCORE,
        uses_expiring: Vec::new(),
        missing_ingredients_count: recipe.ingredients.len(),
        used_ingredients_count: 0,
    }
}
