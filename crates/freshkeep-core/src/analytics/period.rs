//! Reports over a trailing time window.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::daily::DailyAggregate;
use super::summary::AnalyticsSummary;
use crate::error::ValidationError;

/// Reporting window ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
    /// Roughly ten years
    All,
}

impl Period {
    pub fn days(&self) -> i64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 365,
            Period::All => 3650,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }

    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.days())
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Week
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            _ => Err(ValidationError::UnknownValue {
                field: "period",
                value: s.to_string(),
            }),
        }
    }
}

/// One day in a period report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub items_saved: u32,
    pub items_wasted: u32,
    pub money_saved: f64,
    pub money_wasted: f64,
}

impl From<&DailyAggregate> for DailyPoint {
    fn from(row: &DailyAggregate) -> Self {
        Self {
            date: row.date,
            items_saved: row.items_saved,
            // Rows written by older aggregations only carry waste_count.
            items_wasted: row.items_wasted.max(row.waste_count),
            money_saved: row.money_saved,
            money_wasted: if row.money_wasted > 0.0 {
                row.money_wasted
            } else {
                row.waste_cost
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub summary: AnalyticsSummary,
    pub daily: Vec<DailyPoint>,
}

/// Summary and per-day points for rows dated on or after the period start.
pub fn period_report(period: Period, today: NaiveDate, rows: &[DailyAggregate]) -> PeriodReport {
    let start_date = period.start_date(today);
    let mut in_window: Vec<DailyAggregate> = rows
        .iter()
        .filter(|row| row.date >= start_date)
        .cloned()
        .collect();
    in_window.sort_by_key(|row| row.date);

    PeriodReport {
        period,
        start_date,
        end_date: today,
        summary: AnalyticsSummary::from_daily(&in_window),
        daily: in_window.iter().map(DailyPoint::from).collect(),
    }
}
