use chrono::NaiveDate;
use clap::Subcommand;
use freshkeep_core::recipes::{ExpiringIngredient, FixedSource, RecipeCandidate, RecipeDetail};
use freshkeep_core::{
    Actor, Config, InventoryItem, LocalCatalog, RecipeSource, Recommender, SourceKind,
};
use std::path::PathBuf;

use super::{print_json, read_json, today_or_now, CliResult};

#[derive(Subcommand)]
pub enum RecipesAction {
    /// Rank recipes for the given ingredients
    Suggest {
        /// Ingredients as NAME or NAME=DAYS_LEFT (e.g. milk=1)
        ingredients: Vec<String>,
        /// Also use the active items of an items JSON file
        #[arg(long)]
        items: Option<PathBuf>,
        /// Owner of the items (with --items)
        #[arg(long, default_value = "")]
        user: String,
        #[arg(long)]
        family: Option<String>,
        /// local_catalog or remote; defaults to recipes.default_source
        #[arg(long)]
        source: Option<String>,
        /// Candidate recipes JSON file (required for the remote source)
        #[arg(long)]
        candidates: Option<PathBuf>,
        /// Defaults to recipes.result_limit
        #[arg(long)]
        limit: Option<usize>,
        /// Days left that count as expiring; defaults to expiration.urgent_window_days
        #[arg(long)]
        urgent_days: Option<i64>,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Show a catalog recipe with the ingredients you have
    Show {
        id: u64,
        /// Ingredients on hand
        #[arg(long)]
        have: Vec<String>,
    },
    /// List the built-in catalog
    Catalog,
}

fn parse_ingredient(raw: &str) -> Result<ExpiringIngredient, Box<dyn std::error::Error>> {
    let (name, days) = match raw.split_once('=') {
        Some((name, days)) => {
            let days = days
                .trim()
                .parse::<i64>()
                .map_err(|e| format!("invalid days in '{raw}': {e}"))?;
            (name, Some(days))
        }
        None => (raw, None),
    };
    Ok(ExpiringIngredient {
        name: name.trim().to_string(),
        days_until_expiry: days,
    })
}

pub fn run(action: RecipesAction) -> CliResult {
    match action {
        RecipesAction::Suggest {
            ingredients,
            items,
            user,
            family,
            source,
            candidates,
            limit,
            urgent_days,
            today,
        } => {
            let config = Config::load_or_default();
            let today = today_or_now(today);

            let mut on_hand = ingredients
                .iter()
                .map(|raw| parse_ingredient(raw))
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(path) = items {
                let actor = match family {
                    Some(family) => Actor::family_member(user, family),
                    None => Actor::user(user),
                };
                let stored: Vec<InventoryItem> = read_json(&path)?;
                on_hand.extend(
                    stored
                        .iter()
                        .filter(|item| item.is_active() && item.is_visible_to(&actor))
                        .map(|item| ExpiringIngredient::from_item(item, today)),
                );
            }

            let kind = match source {
                Some(source) => source.parse::<SourceKind>()?,
                None => config.recipes.default_source,
            };
            let fixed;
            let recipe_source: &dyn RecipeSource = match (candidates, kind) {
                (Some(path), kind) => {
                    let recipes: Vec<RecipeCandidate> = read_json(&path)?;
                    fixed = FixedSource::new(kind, recipes);
                    &fixed
                }
                (None, SourceKind::LocalCatalog) => LocalCatalog::builtin(),
                (None, SourceKind::Remote) => {
                    return Err("the remote source needs --candidates".into());
                }
            };

            let defaults = config.recommender();
            let recommender = Recommender::new(
                limit.unwrap_or(defaults.limit),
                urgent_days.unwrap_or(defaults.urgent_window_days),
            );
            print_json(&recommender.recommend(&on_hand, recipe_source)?)?;
        }
        RecipesAction::Show { id, have } => {
            let recipe = LocalCatalog::builtin()
                .get(id)
                .ok_or_else(|| format!("recipe {id} not found"))?;
            print_json(&RecipeDetail::for_household(recipe, &have))?;
        }
        RecipesAction::Catalog => {
            print_json(LocalCatalog::builtin().recipes())?;
        }
    }
    Ok(())
}
