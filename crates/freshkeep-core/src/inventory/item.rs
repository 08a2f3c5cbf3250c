//! Inventory item record, its status enum and transition errors.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::ValidationError;
use crate::freshness::{days_until_expiry, FreshnessTier, Perishable};
use crate::policy::{Category, StorageLocation};

/// Item status.
///
/// ```text
///            ┌──> CONSUMED
///            ├──> WASTED
///   ACTIVE ──┼──> EXPIRED   (time-based sweep)
///            └──> DELETED
/// ```
///
/// Every state other than `Active` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Consumed,
    Wasted,
    Expired,
    Deleted,
}

impl ItemStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ItemStatus::Active)
    }

    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &ItemStatus) -> bool {
        match self {
            ItemStatus::Active => !matches!(to, ItemStatus::Active),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Consumed => "consumed",
            ItemStatus::Wasted => "wasted",
            ItemStatus::Expired => "expired",
            ItemStatus::Deleted => "deleted",
        }
    }
}

impl Default for ItemStatus {
    fn default() -> Self {
        ItemStatus::Active
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ItemStatus::Active),
            "consumed" => Ok(ItemStatus::Consumed),
            "wasted" => Ok(ItemStatus::Wasted),
            "expired" => Ok(ItemStatus::Expired),
            "deleted" => Ok(ItemStatus::Deleted),
            _ => Err(ValidationError::UnknownValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// Operation applied to an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleAction {
    Update,
    Consume,
    Waste,
    Delete,
    Expire,
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleAction::Update => "update",
            LifecycleAction::Consume => "consume",
            LifecycleAction::Waste => "waste",
            LifecycleAction::Delete => "delete",
            LifecycleAction::Expire => "expire",
        };
        f.write_str(name)
    }
}

/// Error returned when an action is attempted from a state that disallows it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("cannot {action} item '{item_id}' in state {from}")]
pub struct TransitionError {
    pub item_id: String,
    pub from: ItemStatus,
    pub action: LifecycleAction,
}

/// The user a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    #[serde(default)]
    pub family_id: Option<String>,
}

impl Actor {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            family_id: None,
        }
    }

    pub fn family_member(user_id: impl Into<String>, family_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            family_id: Some(family_id.into()),
        }
    }
}

/// A perishable household item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryItem {
    /// Opaque identifier
    pub id: String,
    /// Creating user
    pub user_id: String,
    /// Family scope; when set the item is visible to every family member
    #[serde(default)]
    pub family_id: Option<String>,
    pub name: String,
    /// Strictly positive while active
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
    pub storage: StorageLocation,
    pub purchase_date: NaiveDate,
    /// Set on creation (computed when not supplied); only changed by explicit update
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    pub status: ItemStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Incremented on every committed mutation; stores compare it on write
    #[serde(default)]
    pub revision: u64,
}

impl InventoryItem {
    /// Whether `actor` may see and mutate this item.
    pub fn is_visible_to(&self, actor: &Actor) -> bool {
        match &self.family_id {
            Some(family) => actor.family_id.as_deref() == Some(family.as_str()),
            None => self.user_id == actor.user_id,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }

    pub fn freshness(&self, today: NaiveDate) -> FreshnessTier {
        FreshnessTier::classify(self.expiration_date, today)
    }

    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        days_until_expiry(self.expiration_date, today)
    }

    /// Check the item is in a state from which `action` may run.
    pub fn ensure_active_for(&self, action: LifecycleAction) -> Result<(), TransitionError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(TransitionError {
                item_id: self.id.clone(),
                from: self.status,
                action,
            })
        }
    }
}

impl Perishable for InventoryItem {
    fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }
}

fn default_unit() -> String {
    "piece".into()
}

/// Request to create an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewItem {
    pub name: String,
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub storage: StorageLocation,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: default_unit(),
            category: Category::Other,
            storage: StorageLocation::Fridge,
            purchase_date: None,
            expiration_date: None,
            notes: None,
            photo_url: None,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn storage(mut self, storage: StorageLocation) -> Self {
        self.storage = storage;
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn purchased_on(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    pub fn expires_on(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }
}

/// Partial update of the whitelisted item fields.
///
/// Fields outside the whitelist (status, owner, timestamps, ...) are accepted
/// during deserialization and dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub storage: Option<StorageLocation>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}
