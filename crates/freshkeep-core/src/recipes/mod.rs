//! Recipe recommendation.
//!
//! Candidates come from a [`RecipeSource`]; the source's [`SourceKind`]
//! selects the [`ScoringVariant`] used to rank them.

mod candidate;
mod catalog;
mod recommend;
mod scorer;
mod source;

pub use candidate::{DetailIngredient, Ingredient, RecipeCandidate, RecipeDetail, ScoredRecipe};
pub use catalog::LocalCatalog;
pub use recommend::{
    recommend_for_expiring, ExpiringIngredient, Recommender, DEFAULT_URGENT_WINDOW_DAYS,
};
pub use scorer::{
    names_match, rank, score, ScoringVariant, DEFAULT_RESULT_LIMIT, FALLBACK_COUNT,
    MISSING_INGREDIENT_PENALTY, NEUTRAL_SCORE, USED_INGREDIENT_POINTS, ZERO_WASTE_BONUS,
};
pub use source::{FixedSource, RecipeSource, SourceKind};
