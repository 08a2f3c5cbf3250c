//! Rule-based tips derived from a summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::summary::AnalyticsSummary;

/// More wasted items than this triggers the waste tip.
pub const WASTE_TIP_THRESHOLD: u32 = 5;

/// Saved items needed for the progress insight.
pub const PROGRESS_INSIGHT_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Tip,
    Achievement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Insight {
    fn new(kind: InsightKind, title: &str, description: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.to_string(),
            description,
            action_text: None,
            action_url: None,
            created_at: now,
        }
    }

    fn with_action(mut self, text: &str, url: &str) -> Self {
        self.action_text = Some(text.to_string());
        self.action_url = Some(url.to_string());
        self
    }
}

/// Personalized insights; never empty.
pub fn insights(summary: &AnalyticsSummary, now: DateTime<Utc>) -> Vec<Insight> {
    let mut found = Vec::new();

    if summary.waste_count > WASTE_TIP_THRESHOLD {
        found.push(
            Insight::new(
                InsightKind::Tip,
                "Reduce Food Waste",
                format!(
                    "You've wasted {} items. Try checking expiration dates more frequently!",
                    summary.waste_count
                ),
                now,
            )
            .with_action("View expiring items", "/inventory/expiring"),
        );
    }

    if summary.items_saved >= PROGRESS_INSIGHT_THRESHOLD {
        found.push(Insight::new(
            InsightKind::Achievement,
            "Great Progress!",
            format!(
                "You've saved {} items from waste. Keep it up!",
                summary.items_saved
            ),
            now,
        ));
    }

    if found.is_empty() {
        found.push(
            Insight::new(
                InsightKind::Tip,
                "Track Your Groceries",
                "Add items to your inventory when you shop to get personalized recommendations."
                    .to_string(),
                now,
            )
            .with_action("Add items", "/inventory/add"),
        );
    }

    found
}
