//! Inventory items and their lifecycle.
//!
//! This module provides:
//! - The item record, status enum and transition error
//! - Pure lifecycle transitions (create, update, consume, waste, delete, expire)
//! - Consumption and waste log entries
//! - Filtered listings and stats
//! - The [`Inventory`] service that commits transitions against a store

mod item;
mod lifecycle;
mod listing;
mod logs;
mod service;

pub use item::{
    Actor, InventoryItem, ItemStatus, ItemUpdate, LifecycleAction, NewItem, TransitionError,
};
pub use lifecycle::{ItemLifecycle, Precondition, SweepPlan, Transition, WasteRequest};
pub use listing::{
    list_items, InventoryStats, ItemFilter, ItemListing, ItemView, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
pub use logs::{ConsumptionLogEntry, LogEntry, WasteLogEntry, WasteReason};
pub use service::{Inventory, LogAppendWarning, SweepFailure, SweepReport, TransitionOutcome};
