//! Per-day aggregate rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::inventory::{ConsumptionLogEntry, WasteLogEntry};

/// Value credited per consumed item when no per-item figure exists.
pub const FLAT_VALUE_PER_ITEM: f64 = 3.0;

/// CO2 (kg) credited per consumed item.
pub const FLAT_CO2_PER_ITEM_KG: f64 = 2.5;

/// Water (liters) credited per consumed item.
pub const FLAT_WATER_PER_ITEM_LITERS: f64 = 1000.0;

/// Savings and waste totals for one user on one date.
///
/// Missing numeric fields deserialize as zero; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DailyAggregate {
    #[serde(default)]
    pub user_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub items_saved: u32,
    #[serde(default)]
    pub items_wasted: u32,
    #[serde(default)]
    pub money_saved: f64,
    #[serde(default)]
    pub money_wasted: f64,
    #[serde(default)]
    pub co2_prevented_kg: f64,
    #[serde(default)]
    pub water_saved_liters: f64,
    #[serde(default)]
    pub waste_count: u32,
    #[serde(default)]
    pub waste_cost: f64,
}

impl DailyAggregate {
    /// An all-zero row.
    pub fn empty(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            items_saved: 0,
            items_wasted: 0,
            money_saved: 0.0,
            money_wasted: 0.0,
            co2_prevented_kg: 0.0,
            water_saved_liters: 0.0,
            waste_count: 0,
            waste_cost: 0.0,
        }
    }

    /// Aggregate the given period's logs into one row for `user_id`.
    ///
    /// Consumed items are credited at the flat per-item rates; waste cost is
    /// the sum of the logged estimates. Entries of other users are ignored.
    pub fn from_logs(
        user_id: &str,
        date: NaiveDate,
        consumption: &[ConsumptionLogEntry],
        waste: &[WasteLogEntry],
    ) -> Self {
        let items_saved = consumption.iter().filter(|e| e.user_id == user_id).count() as u32;
        let wasted: Vec<&WasteLogEntry> = waste.iter().filter(|e| e.user_id == user_id).collect();
        let waste_count = wasted.len() as u32;
        let waste_cost: f64 = wasted.iter().map(|e| e.estimated_value).sum();
        let saved = f64::from(items_saved);

        Self {
            user_id: user_id.to_string(),
            date,
            items_saved,
            items_wasted: waste_count,
            money_saved: saved * FLAT_VALUE_PER_ITEM,
            money_wasted: waste_cost,
            co2_prevented_kg: saved * FLAT_CO2_PER_ITEM_KG,
            water_saved_liters: saved * FLAT_WATER_PER_ITEM_LITERS,
            waste_count,
            waste_cost,
        }
    }
}
