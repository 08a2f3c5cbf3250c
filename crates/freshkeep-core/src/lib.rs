//! # FreshKeep Core Library
//!
//! This library provides the business logic for the FreshKeep household food
//! inventory. It is usable without any network or database: storage, time and
//! recipe lookup are collaborators passed in by the caller, and the
//! `freshkeep` CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Policy**: Per-category shelf life, unit prices and environmental
//!   coefficients, with an explicit fallback for unknown categories
//! - **Freshness**: Expiration date computation and freshness tiers
//! - **Inventory**: Item lifecycle state machine with compare-and-set commits
//!   and best-effort consumption/waste logging
//! - **Analytics**: Daily aggregates, streaks, idempotent achievement unlocks
//!   and insights
//! - **Recipes**: Scoring and ranking of recipe candidates against expiring items
//!
//! ## Key Components
//!
//! - [`ItemLifecycle`]: Pure transition rules for inventory items
//! - [`Inventory`]: Lifecycle operations against an [`ItemStore`] and [`LogStore`]
//! - [`AchievementEngine`]: Achievement checks against an [`AchievementStore`]
//! - [`Recommender`]: Recipe ranking over a [`RecipeSource`]
//! - [`Config`]: Application configuration management

pub mod analytics;
pub mod clock;
pub mod config;
pub mod error;
pub mod freshness;
pub mod impact;
pub mod inventory;
pub mod policy;
pub mod recipes;
pub mod store;

pub use analytics::{
    current_streak, best_streak, period_report, AchievementBoard, AchievementEngine,
    AnalyticsSummary, DailyAggregate, Insight, Period, PeriodReport,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{data_dir, Config};
pub use error::{ConfigError, CoreError, Result, StoreError, ValidationError};
pub use freshness::{compute_expiration, FreshnessTier};
pub use impact::{estimate_environmental_impact, estimate_value, EnvironmentalImpact};
pub use inventory::{
    Actor, Inventory, InventoryItem, ItemLifecycle, ItemStatus, NewItem, TransitionError,
    WasteReason,
};
pub use policy::{guess_category, Category, ExpirationMode, PolicyTable, StorageLocation};
pub use recipes::{LocalCatalog, RecipeSource, Recommender, ScoredRecipe, SourceKind};
pub use store::{AchievementStore, ItemStore, LogStore, MemoryStore};
