//! Freshness tiers derived from days left until expiry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Items with at most this many days left (and more than zero) are `Warning`.
pub const WARNING_THRESHOLD_DAYS: i64 = 1;

/// Derived freshness classification. Never stored; recomputed on each read.
///
/// Variants are ordered from worst to best so that `Ord` reflects urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessTier {
    Expired,
    ExpiresToday,
    Warning,
    Fresh,
}

impl FreshnessTier {
    pub const ALL: [FreshnessTier; 4] = [
        FreshnessTier::Expired,
        FreshnessTier::ExpiresToday,
        FreshnessTier::Warning,
        FreshnessTier::Fresh,
    ];

    /// Tier for an expiration date as seen on `today`.
    ///
    /// An unknown expiration date is optimistically fresh.
    pub fn classify(expiration_date: Option<NaiveDate>, today: NaiveDate) -> FreshnessTier {
        match days_until_expiry(expiration_date, today) {
            None => FreshnessTier::Fresh,
            Some(days) => FreshnessTier::from_days_left(days),
        }
    }

    pub fn from_days_left(days: i64) -> FreshnessTier {
        if days < 0 {
            FreshnessTier::Expired
        } else if days == 0 {
            FreshnessTier::ExpiresToday
        } else if days <= WARNING_THRESHOLD_DAYS {
            FreshnessTier::Warning
        } else {
            FreshnessTier::Fresh
        }
    }

    /// Whether the item needs attention soon but is not yet expired.
    pub fn is_expiring(&self) -> bool {
        matches!(self, FreshnessTier::Warning | FreshnessTier::ExpiresToday)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessTier::Expired => "expired",
            FreshnessTier::ExpiresToday => "expires_today",
            FreshnessTier::Warning => "warning",
            FreshnessTier::Fresh => "fresh",
        }
    }

    /// Display color (hex) for badges.
    pub fn color(&self) -> &'static str {
        match self {
            FreshnessTier::Fresh => "#4CAF50",
            FreshnessTier::Warning => "#FF9800",
            FreshnessTier::ExpiresToday => "#FF5722",
            FreshnessTier::Expired => "#F44336",
        }
    }
}

impl fmt::Display for FreshnessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole calendar days from `today` to the expiration date (negative once past).
pub fn days_until_expiry(expiration_date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    expiration_date.map(|date| (date - today).num_days())
}

/// Anything with an optional expiration date.
pub trait Perishable {
    fn expiration_date(&self) -> Option<NaiveDate>;
}

/// Bucket items by tier. Every tier is present in the result, possibly empty.
pub fn group_by_freshness<T: Perishable>(
    items: &[T],
    today: NaiveDate,
) -> BTreeMap<FreshnessTier, Vec<&T>> {
    let mut groups: BTreeMap<FreshnessTier, Vec<&T>> =
        FreshnessTier::ALL.iter().map(|t| (*t, Vec::new())).collect();

    for item in items {
        let tier = FreshnessTier::classify(item.expiration_date(), today);
        groups.entry(tier).or_default().push(item);
    }
    groups
}

/// Items expiring within `[today, today + days]`, soonest first.
///
/// Items without an expiration date or already past it are excluded.
pub fn expiring_within<T: Perishable>(items: &[T], today: NaiveDate, days: i64) -> Vec<&T> {
    let mut expiring: Vec<(NaiveDate, &T)> = items
        .iter()
        .filter_map(|item| item.expiration_date().map(|date| (date, item)))
        .filter(|(date, _)| {
            let left = (*date - today).num_days();
            (0..=days).contains(&left)
        })
        .collect();

    expiring.sort_by_key(|(date, _)| *date);
    expiring.into_iter().map(|(_, item)| item).collect()
}
