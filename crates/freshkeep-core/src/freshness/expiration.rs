//! Expiration date computation.
//!
//! ```text
//! base (category) -> storage adjustment -> mode multiplier (truncated) -> + purchase date
//! ```

use chrono::{Duration, NaiveDate};

use crate::policy::{Category, ExpirationMode, PolicyTable, StorageLocation};

/// Frozen items never get less than this many days.
pub const FREEZER_MIN_DAYS: i64 = 90;

/// Shelf-life multiplier for frozen storage.
pub const FREEZER_FACTOR: i64 = 10;

/// Shelf life in days after storage and mode adjustments.
pub fn adjusted_shelf_life_days(
    table: &PolicyTable,
    category: Category,
    storage: StorageLocation,
    mode: ExpirationMode,
) -> i64 {
    let base = table.shelf_life_days(category);

    let stored = match storage {
        StorageLocation::Freezer => (base * FREEZER_FACTOR).max(FREEZER_MIN_DAYS),
        StorageLocation::Pantry if category.is_pantry_native() => base,
        StorageLocation::Pantry => (base / 2).max(1),
        StorageLocation::Fridge => base,
    };

    // Truncation, not rounding: 7 days * 0.7 is 4 days.
    (stored as f64 * mode.multiplier()) as i64
}

/// Expiration date from the built-in policy table.
///
/// `purchase_date` defaults to `today` when absent.
pub fn compute_expiration(
    category: Category,
    purchase_date: Option<NaiveDate>,
    storage: StorageLocation,
    mode: ExpirationMode,
    today: NaiveDate,
) -> NaiveDate {
    compute_expiration_with(
        PolicyTable::builtin(),
        category,
        purchase_date,
        storage,
        mode,
        today,
    )
}

/// Expiration date from an explicit policy table.
pub fn compute_expiration_with(
    table: &PolicyTable,
    category: Category,
    purchase_date: Option<NaiveDate>,
    storage: StorageLocation,
    mode: ExpirationMode,
    today: NaiveDate,
) -> NaiveDate {
    let start = purchase_date.unwrap_or(today);
    let days = adjusted_shelf_life_days(table, category, storage, mode);
    start + Duration::days(days)
}
