//! Savings analytics: daily aggregates, streaks, achievements and insights.
//!
//! The streak functions are only called from the summary, which in turn feeds
//! achievement progress and insights.

mod achievements;
mod daily;
mod insights;
mod period;
mod streak;
mod summary;

pub use achievements::{
    achievement_icon, find_achievement, progress, Achievement, AchievementBoard,
    AchievementEngine, AchievementStatus, UnlockedAchievement, ACHIEVEMENTS,
};
pub use daily::{
    DailyAggregate, FLAT_CO2_PER_ITEM_KG, FLAT_VALUE_PER_ITEM, FLAT_WATER_PER_ITEM_LITERS,
};
pub use insights::{insights, Insight, InsightKind, PROGRESS_INSIGHT_THRESHOLD, WASTE_TIP_THRESHOLD};
pub use period::{period_report, DailyPoint, Period, PeriodReport};
pub use streak::{best_streak, current_streak};
pub use summary::{AnalyticsSummary, SummarySource};
