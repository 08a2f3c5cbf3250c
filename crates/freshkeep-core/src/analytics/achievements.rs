//! Achievement catalog, progress and unlocking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::summary::AnalyticsSummary;
use crate::clock::Clock;
use crate::error::Result;
use crate::store::AchievementStore;

/// Catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub target: u32,
    pub icon: &'static str,
}

const DEFAULT_ICON: &str = "🏅";

/// Built-in achievements, in display order.
pub static ACHIEVEMENTS: [Achievement; 10] = [
    Achievement {
        id: "first_save",
        name: "First Save",
        description: "Saved your first item from waste",
        target: 1,
        icon: "🌱",
    },
    Achievement {
        id: "week_streak_7",
        name: "Week Warrior",
        description: "7-day streak without waste",
        target: 7,
        icon: "🔥",
    },
    Achievement {
        id: "month_streak_30",
        name: "Monthly Master",
        description: "30-day streak without waste",
        target: 30,
        icon: "🏆",
    },
    Achievement {
        id: "saved_10",
        name: "Food Saver",
        description: "Saved 10 items from waste",
        target: 10,
        icon: "⭐",
    },
    Achievement {
        id: "saved_50",
        name: "Waste Fighter",
        description: "Saved 50 items from waste",
        target: 50,
        icon: "🌟",
    },
    Achievement {
        id: "saved_100",
        name: "Eco Champion",
        description: "Saved 100 items from waste",
        target: 100,
        icon: "💫",
    },
    Achievement {
        id: "money_saved_50",
        name: "Budget Conscious",
        description: "Saved $50 worth of food",
        target: 50,
        icon: "💰",
    },
    Achievement {
        id: "money_saved_100",
        name: "Smart Saver",
        description: "Saved $100 worth of food",
        target: 100,
        icon: "💎",
    },
    Achievement {
        id: "recipes_tried_5",
        name: "Kitchen Explorer",
        description: "Tried 5 suggested recipes",
        target: 5,
        icon: "👨‍🍳",
    },
    Achievement {
        id: "family_member",
        name: "Team Player",
        description: "Joined a family group",
        target: 1,
        icon: "👨‍👩‍👧‍👦",
    },
];

/// Look up a catalog entry by id.
pub fn find_achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Icon for an achievement id, with a generic medal for unknown ids.
pub fn achievement_icon(id: &str) -> &'static str {
    find_achievement(id).map_or(DEFAULT_ICON, |a| a.icon)
}

/// Progress toward `achievement` in `[0.0, 1.0]`.
///
/// The metric is picked by id prefix. Ids with no tracked metric
/// (recipes tried, family membership) always report zero.
pub fn progress(achievement: &Achievement, summary: &AnalyticsSummary) -> f64 {
    let id = achievement.id;
    let metric = if id == "first_save" || id.starts_with("saved_") {
        f64::from(summary.items_saved)
    } else if id.starts_with("week_streak") {
        f64::from(summary.current_streak)
    } else if id.starts_with("month_streak") {
        f64::from(summary.best_streak)
    } else if id.starts_with("money_saved_") {
        summary.money_saved
    } else {
        return 0.0;
    };

    if achievement.target == 0 {
        return 1.0;
    }
    (metric / f64::from(achievement.target)).clamp(0.0, 1.0)
}

/// Stored unlock row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnlockedAchievement {
    pub user_id: String,
    pub achievement_id: String,
    pub unlocked_at: DateTime<Utc>,
}

/// One catalog entry as shown to a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementStatus {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub progress: f64,
    pub target: u32,
    pub current: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementBoard {
    pub unlocked_count: usize,
    pub total_count: usize,
    pub achievements: Vec<AchievementStatus>,
}

impl AchievementBoard {
    /// Status of every catalog entry given the user's summary and unlock rows.
    pub fn build(summary: &AnalyticsSummary, unlocked: &[UnlockedAchievement]) -> Self {
        let achievements: Vec<AchievementStatus> = ACHIEVEMENTS
            .iter()
            .map(|achievement| {
                let row = unlocked.iter().find(|u| u.achievement_id == achievement.id);
                let progress = progress(achievement, summary);
                AchievementStatus {
                    id: achievement.id,
                    name: achievement.name,
                    description: achievement.description,
                    icon: achievement.icon,
                    unlocked: row.is_some(),
                    unlocked_at: row.map(|u| u.unlocked_at),
                    progress,
                    target: achievement.target,
                    current: (progress * f64::from(achievement.target)).floor() as u32,
                }
            })
            .collect();

        Self {
            unlocked_count: achievements.iter().filter(|a| a.unlocked).count(),
            total_count: achievements.len(),
            achievements,
        }
    }
}

/// Unlocks earned achievements against an [`AchievementStore`].
pub struct AchievementEngine<'a> {
    store: &'a dyn AchievementStore,
    clock: &'a dyn Clock,
}

impl<'a> AchievementEngine<'a> {
    pub fn new(store: &'a dyn AchievementStore, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Unlock every achievement the summary has completed and the user does
    /// not hold yet. Returns only the newly unlocked entries, so a second call
    /// with the same summary returns nothing.
    pub fn check_and_unlock(
        &self,
        user_id: &str,
        summary: &AnalyticsSummary,
    ) -> Result<Vec<&'static Achievement>> {
        let held = self.store.unlocked(user_id)?;
        let now = self.clock.now();
        let mut newly = Vec::new();

        for achievement in ACHIEVEMENTS.iter() {
            if held.iter().any(|u| u.achievement_id == achievement.id) {
                continue;
            }
            if progress(achievement, summary) < 1.0 {
                continue;
            }
            let row = UnlockedAchievement {
                user_id: user_id.to_string(),
                achievement_id: achievement.id.to_string(),
                unlocked_at: now,
            };
            // A concurrent check may have inserted the row already.
            if self.store.insert_if_absent(&row)? {
                newly.push(achievement);
            }
        }

        if !newly.is_empty() {
            tracing::info!(user_id, unlocked = newly.len(), "achievements unlocked");
        }
        Ok(newly)
    }

    pub fn board(&self, user_id: &str, summary: &AnalyticsSummary) -> Result<AchievementBoard> {
        let held = self.store.unlocked(user_id)?;
        Ok(AchievementBoard::build(summary, &held))
    }
}
