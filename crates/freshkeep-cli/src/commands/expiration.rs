use chrono::NaiveDate;
use clap::Args;
use freshkeep_core::freshness::{adjusted_shelf_life_days, days_until_expiry};
use freshkeep_core::{
    compute_expiration, guess_category, Category, Config, ExpirationMode, FreshnessTier,
    PolicyTable, StorageLocation,
};
use serde::Serialize;

use super::{print_json, today_or_now, CliResult};

#[derive(Args)]
pub struct ExpirationArgs {
    /// Food category; unknown names fall back to "other"
    #[arg(long)]
    category: Option<String>,
    /// Item name, used to guess the category when none is given
    #[arg(long)]
    name: Option<String>,
    /// Storage location (fridge, freezer, pantry)
    #[arg(long, default_value = "fridge")]
    storage: String,
    /// Estimation mode; defaults to expiration.default_mode
    #[arg(long)]
    mode: Option<String>,
    /// Purchase date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    purchased: Option<NaiveDate>,
    /// Override today's date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Serialize)]
struct ExpirationEstimate {
    category: Category,
    storage: StorageLocation,
    mode: ExpirationMode,
    purchase_date: NaiveDate,
    shelf_life_days: i64,
    expiration_date: NaiveDate,
    days_until_expiry: Option<i64>,
    freshness: FreshnessTier,
    color: &'static str,
}

pub fn run(args: ExpirationArgs) -> CliResult {
    let config = Config::load_or_default();
    let today = today_or_now(args.today);

    let category = match (&args.category, &args.name) {
        (Some(category), _) => Category::parse_lenient(category),
        (None, Some(name)) => guess_category(name),
        (None, None) => Category::Other,
    };
    let storage = StorageLocation::parse_lenient(&args.storage);
    let mode = args
        .mode
        .as_deref()
        .map_or(config.expiration.default_mode, ExpirationMode::parse_lenient);
    let purchase_date = args.purchased.unwrap_or(today);

    let expiration_date = compute_expiration(category, Some(purchase_date), storage, mode, today);
    let freshness = FreshnessTier::classify(Some(expiration_date), today);

    print_json(&ExpirationEstimate {
        category,
        storage,
        mode,
        purchase_date,
        shelf_life_days: adjusted_shelf_life_days(PolicyTable::builtin(), category, storage, mode),
        expiration_date,
        days_until_expiry: days_until_expiry(Some(expiration_date), today),
        freshness,
        color: freshness.color(),
    })
}
