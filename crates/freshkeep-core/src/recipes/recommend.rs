//! Recipes that use up what is about to expire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::candidate::ScoredRecipe;
use super::scorer::{rank, DEFAULT_RESULT_LIMIT};
use super::source::RecipeSource;
use crate::error::Result;
use crate::inventory::InventoryItem;

/// Items with at most this many days left count as expiring for scoring.
pub const DEFAULT_URGENT_WINDOW_DAYS: i64 = 2;

/// An ingredient on hand and how long it has left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringIngredient {
    pub name: String,
    #[serde(default)]
    pub days_until_expiry: Option<i64>,
}

impl ExpiringIngredient {
    pub fn from_item(item: &InventoryItem, today: NaiveDate) -> Self {
        Self {
            name: item.name.clone(),
            days_until_expiry: item.days_until_expiry(today),
        }
    }
}

/// Ranks recipes for a household's expiring items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommender {
    pub limit: usize,
    pub urgent_window_days: i64,
}

impl Default for Recommender {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RESULT_LIMIT,
            urgent_window_days: DEFAULT_URGENT_WINDOW_DAYS,
        }
    }
}

impl Recommender {
    pub fn new(limit: usize, urgent_window_days: i64) -> Self {
        Self {
            limit,
            urgent_window_days,
        }
    }

    /// Ingredient names ordered by urgency (unknown expiry last) and the
    /// subset inside the urgent window.
    pub fn split(&self, items: &[ExpiringIngredient]) -> (Vec<String>, Vec<String>) {
        let mut sorted: Vec<&ExpiringIngredient> = items.iter().collect();
        sorted.sort_by_key(|item| item.days_until_expiry.unwrap_or(i64::MAX));

        let all = sorted.iter().map(|item| item.name.clone()).collect();
        let urgent = sorted
            .iter()
            .filter(|item| {
                item.days_until_expiry
                    .is_some_and(|days| days <= self.urgent_window_days)
            })
            .map(|item| item.name.clone())
            .collect();
        (all, urgent)
    }

    /// Score the source's candidates against `items`.
    ///
    /// No items means no recommendations; the source is not consulted.
    pub fn recommend(
        &self,
        items: &[ExpiringIngredient],
        source: &dyn RecipeSource,
    ) -> Result<Vec<ScoredRecipe>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let (available, urgent) = self.split(items);
        let candidates = source.candidates(&available)?;
        let variant = source.kind().scoring_variant();

        tracing::debug!(
            candidates = candidates.len(),
            urgent = urgent.len(),
            source = %source.kind(),
            "ranking recipes"
        );
        Ok(rank(&candidates, &available, &urgent, variant, self.limit))
    }
}

/// [`Recommender::recommend`] with a custom limit and the default urgent window.
pub fn recommend_for_expiring(
    items: &[ExpiringIngredient],
    source: &dyn RecipeSource,
    limit: usize,
) -> Result<Vec<ScoredRecipe>> {
    Recommender::new(limit, DEFAULT_URGENT_WINDOW_DAYS).recommend(items, source)
}
