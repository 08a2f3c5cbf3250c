//! Read-side views over inventory items: filtered listings and stats.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::item::{Actor, InventoryItem, ItemStatus};
use crate::freshness::FreshnessTier;
use crate::impact::{estimate_value_with, round_to};
use crate::policy::{Category, PolicyTable, StorageLocation};

/// Page size used when a filter does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Largest page a listing returns.
pub const MAX_PAGE_SIZE: usize = 100;

/// An item enriched with its freshness as of a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub freshness: FreshnessTier,
    pub days_until_expiry: Option<i64>,
}

impl ItemView {
    pub fn new(item: InventoryItem, today: NaiveDate) -> Self {
        let freshness = item.freshness(today);
        let days_until_expiry = item.days_until_expiry(today);
        Self {
            item,
            freshness,
            days_until_expiry,
        }
    }
}

fn default_status() -> ItemStatus {
    ItemStatus::Active
}

/// Listing filter. Every field is optional; an empty filter lists active items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFilter {
    #[serde(default = "default_status")]
    pub status: ItemStatus,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub storage: Option<StorageLocation>,
    /// Case-insensitive substring of the item name
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            status: default_status(),
            category: None,
            storage: None,
            search: None,
            offset: 0,
            limit: None,
        }
    }
}

impl ItemFilter {
    fn matches(&self, item: &InventoryItem) -> bool {
        if item.status != self.status {
            return false;
        }
        if self.category.is_some_and(|c| c != item.category) {
            return false;
        }
        if self.storage.is_some_and(|s| s != item.storage) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                item.name.to_lowercase().contains(&term.to_lowercase())
            }
            _ => true,
        }
    }

    fn page_size(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }
}

/// One page of a listing.
///
/// `total` and the two counts cover every matching item, not only the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemListing {
    pub items: Vec<ItemView>,
    pub total: usize,
    pub expiring_count: usize,
    pub expired_count: usize,
}

/// List the items `actor` can see, soonest expiry first.
///
/// Deleted items are never listed, whatever the filter asks for.
pub fn list_items(
    items: &[InventoryItem],
    actor: &Actor,
    filter: &ItemFilter,
    today: NaiveDate,
) -> ItemListing {
    let mut matching: Vec<&InventoryItem> = items
        .iter()
        .filter(|item| item.status != ItemStatus::Deleted)
        .filter(|item| item.is_visible_to(actor))
        .filter(|item| filter.matches(item))
        .collect();

    // Items without an expiration date sort last.
    matching.sort_by(|a, b| {
        let key = |item: &InventoryItem| (item.expiration_date.is_none(), item.expiration_date);
        key(*a).cmp(&key(*b)).then_with(|| a.created_at.cmp(&b.created_at))
    });

    let mut expiring_count = 0;
    let mut expired_count = 0;
    for item in &matching {
        let tier = item.freshness(today);
        if tier.is_expiring() {
            expiring_count += 1;
        } else if tier == FreshnessTier::Expired {
            expired_count += 1;
        }
    }

    let total = matching.len();
    let views = matching
        .into_iter()
        .skip(filter.offset)
        .take(filter.page_size())
        .map(|item| ItemView::new(item.clone(), today))
        .collect();

    ItemListing {
        items: views,
        total,
        expiring_count,
        expired_count,
    }
}

/// Aggregate counts and value over active items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryStats {
    pub total_items: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_storage: BTreeMap<StorageLocation, usize>,
    pub by_freshness: BTreeMap<FreshnessTier, usize>,
    pub estimated_value: f64,
    pub expiring_count: usize,
    pub expired_count: usize,
}

impl InventoryStats {
    /// Stats over the active items in `items`; every other status is ignored.
    pub fn compute(items: &[InventoryItem], today: NaiveDate) -> Self {
        Self::compute_with(PolicyTable::builtin(), items, today)
    }

    pub fn compute_with(table: &PolicyTable, items: &[InventoryItem], today: NaiveDate) -> Self {
        let mut stats = Self {
            total_items: 0,
            by_category: BTreeMap::new(),
            by_storage: BTreeMap::new(),
            by_freshness: FreshnessTier::ALL.iter().map(|t| (*t, 0)).collect(),
            estimated_value: 0.0,
            expiring_count: 0,
            expired_count: 0,
        };

        let mut value = 0.0;
        for item in items.iter().filter(|item| item.is_active()) {
            stats.total_items += 1;
            *stats.by_category.entry(item.category).or_default() += 1;
            *stats.by_storage.entry(item.storage).or_default() += 1;

            let tier = item.freshness(today);
            *stats.by_freshness.entry(tier).or_default() += 1;
            if tier.is_expiring() {
                stats.expiring_count += 1;
            } else if tier == FreshnessTier::Expired {
                stats.expired_count += 1;
            }

            value += estimate_value_with(table, item.category, item.quantity, &item.unit);
        }
        stats.estimated_value = round_to(value, 2);
        stats
    }
}
