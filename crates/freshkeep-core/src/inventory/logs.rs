//! Append-only consumption and waste log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Why an item was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteReason {
    Forgot,
    Spoiled,
    TastedBad,
    TooMuch,
    ChangedPlans,
    Other,
}

impl WasteReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteReason::Forgot => "forgot",
            WasteReason::Spoiled => "spoiled",
            WasteReason::TastedBad => "tasted_bad",
            WasteReason::TooMuch => "too_much",
            WasteReason::ChangedPlans => "changed_plans",
            WasteReason::Other => "other",
        }
    }
}

impl Default for WasteReason {
    fn default() -> Self {
        WasteReason::Forgot
    }
}

impl fmt::Display for WasteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteReason {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forgot" => Ok(WasteReason::Forgot),
            "spoiled" => Ok(WasteReason::Spoiled),
            "tasted_bad" => Ok(WasteReason::TastedBad),
            "too_much" => Ok(WasteReason::TooMuch),
            "changed_plans" => Ok(WasteReason::ChangedPlans),
            "other" => Ok(WasteReason::Other),
            _ => Err(ValidationError::UnknownValue {
                field: "reason",
                value: s.to_string(),
            }),
        }
    }
}

/// Recorded when an item is fully or partially consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsumptionLogEntry {
    pub id: String,
    pub item_id: String,
    pub user_id: String,
    pub quantity_consumed: f64,
    pub consumed_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Recorded when an item is wasted, with its estimated cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WasteLogEntry {
    pub id: String,
    pub item_id: String,
    pub user_id: String,
    pub wasted_at: DateTime<Utc>,
    pub reason: WasteReason,
    pub quantity: f64,
    #[serde(default)]
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub estimated_value: f64,
    pub co2_impact_kg: f64,
    pub water_impact_liters: f64,
}

/// Either kind of log entry produced by a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    Consumption(ConsumptionLogEntry),
    Waste(WasteLogEntry),
}

impl LogEntry {
    pub fn item_id(&self) -> &str {
        match self {
            LogEntry::Consumption(entry) => &entry.item_id,
            LogEntry::Waste(entry) => &entry.item_id,
        }
    }
}
