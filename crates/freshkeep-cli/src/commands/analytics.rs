use chrono::NaiveDate;
use clap::{Args, Subcommand};
use freshkeep_core::analytics::{insights, UnlockedAchievement};
use freshkeep_core::inventory::{ConsumptionLogEntry, LogEntry, WasteLogEntry};
use freshkeep_core::{
    period_report, AchievementBoard, AchievementEngine, AchievementStore, AnalyticsSummary, Clock,
    Config, DailyAggregate, FixedClock, MemoryStore, Period, SystemClock,
};
use serde::Serialize;
use std::path::PathBuf;

use super::{print_json, read_json, read_json_or_default, today_or_now, write_json, CliResult};

#[derive(Args)]
pub struct SourceArgs {
    /// Daily aggregate JSON file (array of rows)
    #[arg(long)]
    daily: Option<PathBuf>,
    /// Log JSON file (array of consumption/waste entries)
    #[arg(long)]
    logs: Option<PathBuf>,
    /// Only use rows and entries of this user
    #[arg(long)]
    user: Option<String>,
}

struct Sources {
    rows: Vec<DailyAggregate>,
    consumption: Vec<ConsumptionLogEntry>,
    waste: Vec<WasteLogEntry>,
}

impl SourceArgs {
    fn load(&self) -> Result<Sources, Box<dyn std::error::Error>> {
        let mut rows: Vec<DailyAggregate> = match &self.daily {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };
        let entries: Vec<LogEntry> = match &self.logs {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };

        let mut consumption = Vec::new();
        let mut waste = Vec::new();
        for entry in entries {
            match entry {
                LogEntry::Consumption(e) => consumption.push(e),
                LogEntry::Waste(e) => waste.push(e),
            }
        }

        if let Some(user) = &self.user {
            rows.retain(|r| &r.user_id == user);
            consumption.retain(|e| &e.user_id == user);
            waste.retain(|e| &e.user_id == user);
        }

        Ok(Sources {
            rows,
            consumption,
            waste,
        })
    }
}

impl Sources {
    fn summary(&self) -> AnalyticsSummary {
        AnalyticsSummary::resolve(&self.rows, &self.consumption, &self.waste)
    }
}

#[derive(Subcommand)]
pub enum AnalyticsAction {
    /// Totals and streaks; falls back to the logs when there are no rows
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Build one daily aggregate row from a log file
    Aggregate {
        /// Log JSON file
        #[arg(long)]
        logs: PathBuf,
        #[arg(long)]
        user: String,
        /// Row date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Unlock earned achievements and show progress
    Achievements {
        #[command(flatten)]
        source: SourceArgs,
        /// Unlocked achievements JSON file; created or updated
        #[arg(long)]
        unlocked: PathBuf,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Summary and per-day points for a trailing period
    Report {
        #[command(flatten)]
        source: SourceArgs,
        /// week, month, year or all; defaults to analytics.default_period
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Personalized tips
    Insights {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Serialize)]
struct AchievementsOutput {
    newly_unlocked: Vec<&'static str>,
    #[serde(flatten)]
    board: AchievementBoard,
}

pub fn run(action: AnalyticsAction) -> CliResult {
    match action {
        AnalyticsAction::Summary { source } => {
            print_json(&source.load()?.summary())?;
        }
        AnalyticsAction::Aggregate { logs, user, date } => {
            let sources = SourceArgs {
                daily: None,
                logs: Some(logs),
                user: Some(user.clone()),
            }
            .load()?;
            let row = DailyAggregate::from_logs(
                &user,
                today_or_now(date),
                &sources.consumption,
                &sources.waste,
            );
            print_json(&row)?;
        }
        AnalyticsAction::Achievements {
            source,
            unlocked,
            today,
        } => {
            let owner = source.user.clone().ok_or("achievements need --user")?;
            let summary = source.load()?.summary();
            let held: Vec<UnlockedAchievement> = read_json_or_default(&unlocked)?;

            let store = MemoryStore::new();
            for row in &held {
                store.insert_if_absent(row)?;
            }
            let clock: Box<dyn Clock> = match today {
                Some(date) => Box::new(FixedClock::on(date)),
                None => Box::new(SystemClock),
            };
            let engine = AchievementEngine::new(&store, clock.as_ref());

            let newly = engine.check_and_unlock(&owner, &summary)?;
            let mut rows = held;
            rows.extend(
                store
                    .unlocked(&owner)?
                    .into_iter()
                    .filter(|row| newly.iter().any(|a| a.id == row.achievement_id)),
            );
            write_json(&unlocked, &rows)?;

            print_json(&AchievementsOutput {
                newly_unlocked: newly.iter().map(|a| a.id).collect(),
                board: engine.board(&owner, &summary)?,
            })?;
        }
        AnalyticsAction::Report {
            source,
            period,
            today,
        } => {
            let period = match period {
                Some(period) => period.parse::<Period>()?,
                None => Config::load_or_default().analytics.default_period,
            };
            let sources = source.load()?;
            print_json(&period_report(period, today_or_now(today), &sources.rows))?;
        }
        AnalyticsAction::Insights { source } => {
            let summary = source.load()?.summary();
            print_json(&insights(&summary, SystemClock.now()))?;
        }
    }
    Ok(())
}
