//! Expiration and freshness classification.
//!
//! Pure functions over calendar dates; "today" is always passed in (see
//! [`crate::clock`]) so nothing here reads the wall clock.

mod expiration;
mod tier;

pub use expiration::{
    adjusted_shelf_life_days, compute_expiration, compute_expiration_with, FREEZER_FACTOR,
    FREEZER_MIN_DAYS,
};
pub use tier::{
    days_until_expiry, expiring_within, group_by_freshness, FreshnessTier, Perishable,
    WARNING_THRESHOLD_DAYS,
};
