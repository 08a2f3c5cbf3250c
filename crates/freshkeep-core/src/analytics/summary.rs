//! Lifetime summary of savings and waste.

use serde::{Deserialize, Serialize};

use super::daily::{
    DailyAggregate, FLAT_CO2_PER_ITEM_KG, FLAT_VALUE_PER_ITEM, FLAT_WATER_PER_ITEM_LITERS,
};
use super::streak::{best_streak, current_streak};
use crate::inventory::{ConsumptionLogEntry, WasteLogEntry};

/// Where a summary's figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    DailyAggregates,
    /// No aggregate rows existed; estimated from raw logs at flat rates
    LogFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub items_saved: u32,
    pub money_saved: f64,
    pub co2_prevented_kg: f64,
    pub water_saved_liters: f64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub waste_count: u32,
    pub waste_cost: f64,
    pub source: SummarySource,
}

impl AnalyticsSummary {
    /// Plain sums over aggregate rows, unrounded so that achievement
    /// thresholds see the true totals. An empty series yields all zeros.
    pub fn from_daily(rows: &[DailyAggregate]) -> Self {
        Self {
            items_saved: rows.iter().map(|r| r.items_saved).sum(),
            money_saved: rows.iter().map(|r| r.money_saved).sum(),
            co2_prevented_kg: rows.iter().map(|r| r.co2_prevented_kg).sum(),
            water_saved_liters: rows.iter().map(|r| r.water_saved_liters).sum(),
            current_streak: current_streak(rows),
            best_streak: best_streak(rows),
            waste_count: rows.iter().map(|r| r.waste_count).sum(),
            waste_cost: rows.iter().map(|r| r.waste_cost).sum(),
            source: SummarySource::DailyAggregates,
        }
    }

    /// Estimate from raw logs: each consumption counts as one saved item at
    /// the flat rates. Streaks are unknown and reported as zero.
    pub fn from_logs(consumption: &[ConsumptionLogEntry], waste: &[WasteLogEntry]) -> Self {
        let items_saved = consumption.len() as u32;
        let saved = f64::from(items_saved);
        Self {
            items_saved,
            money_saved: saved * FLAT_VALUE_PER_ITEM,
            co2_prevented_kg: saved * FLAT_CO2_PER_ITEM_KG,
            water_saved_liters: saved * FLAT_WATER_PER_ITEM_LITERS,
            current_streak: 0,
            best_streak: 0,
            waste_count: waste.len() as u32,
            waste_cost: waste.iter().map(|w| w.estimated_value).sum(),
            source: SummarySource::LogFallback,
        }
    }

    /// Aggregates when any exist, otherwise the log fallback.
    pub fn resolve(
        rows: &[DailyAggregate],
        consumption: &[ConsumptionLogEntry],
        waste: &[WasteLogEntry],
    ) -> Self {
        if rows.is_empty() {
            Self::from_logs(consumption, waste)
        } else {
            Self::from_daily(rows)
        }
    }
}
