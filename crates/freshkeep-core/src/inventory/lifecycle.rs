//! Item lifecycle transitions.
//!
//! Every operation here is pure: it takes the item as last read and returns a
//! [`Transition`] describing the new record, the precondition a store must
//! still observe to accept the write, and the log entry to append. Committing
//! is the service's job (see [`super::Inventory`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::item::{Actor, InventoryItem, ItemStatus, ItemUpdate, LifecycleAction, NewItem};
use super::logs::{ConsumptionLogEntry, LogEntry, WasteLogEntry, WasteReason};
use crate::error::{Result, ValidationError};
use crate::freshness::compute_expiration_with;
use crate::impact::{estimate_environmental_impact_with, estimate_value_with};
use crate::policy::{ExpirationMode, PolicyTable};

/// State a store must still hold for a transition to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precondition {
    pub status: ItemStatus,
    pub revision: u64,
}

impl Precondition {
    pub fn of(item: &InventoryItem) -> Self {
        Self {
            status: item.status,
            revision: item.revision,
        }
    }

    pub fn holds_for(&self, item: &InventoryItem) -> bool {
        item.status == self.status && item.revision == self.revision
    }
}

/// A computed, not yet committed, change to one item.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub action: LifecycleAction,
    /// Item state to write
    pub item: InventoryItem,
    pub precondition: Precondition,
    /// Log entry to append once the write is accepted
    pub log: Option<LogEntry>,
}

impl Transition {
    /// True when the item would not change (a no-op update).
    pub fn is_noop(&self) -> bool {
        self.item.revision == self.precondition.revision
    }
}

/// Request to record an item as wasted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WasteRequest {
    #[serde(default)]
    pub reason: WasteReason,
    #[serde(default)]
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl WasteRequest {
    pub fn because(reason: WasteReason) -> Self {
        Self {
            reason,
            ..Self::default()
        }
    }
}

/// Planned outcome of an expiration sweep before it is committed.
#[derive(Debug, Clone, Default)]
pub struct SweepPlan {
    pub transitions: Vec<Transition>,
    /// Items examined that did not need to change
    pub unchanged: usize,
}

/// Lifecycle rules bound to a policy table and expiration mode.
#[derive(Debug, Clone, Copy)]
pub struct ItemLifecycle {
    table: &'static PolicyTable,
    mode: ExpirationMode,
}

impl Default for ItemLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemLifecycle {
    /// Built-in policy table, standard mode.
    pub fn new() -> Self {
        Self {
            table: PolicyTable::builtin(),
            mode: ExpirationMode::Standard,
        }
    }

    pub fn with_mode(mode: ExpirationMode) -> Self {
        Self {
            table: PolicyTable::builtin(),
            mode,
        }
    }

    pub fn with_table(table: &'static PolicyTable, mode: ExpirationMode) -> Self {
        Self { table, mode }
    }

    pub fn mode(&self) -> ExpirationMode {
        self.mode
    }

    /// Build a new active item owned by `actor`.
    ///
    /// A missing expiration date is computed from the category, storage and
    /// mode; a missing purchase date is `today`.
    pub fn create(
        &self,
        actor: &Actor,
        new: NewItem,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<InventoryItem> {
        validate_quantity(new.quantity)?;
        validate_name(&new.name)?;

        let purchase_date = new.purchase_date.unwrap_or(today);
        let expiration_date = match new.expiration_date {
            Some(date) => date,
            None => compute_expiration_with(
                self.table,
                new.category,
                Some(purchase_date),
                new.storage,
                self.mode,
                today,
            ),
        };

        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            user_id: actor.user_id.clone(),
            family_id: actor.family_id.clone(),
            name: new.name.trim().to_string(),
            quantity: new.quantity,
            unit: new.unit,
            category: new.category,
            storage: new.storage,
            purchase_date,
            expiration_date: Some(expiration_date),
            status: ItemStatus::Active,
            notes: new.notes,
            photo_url: new.photo_url,
            created_at: now,
            updated_at: now,
            revision: 0,
        };

        tracing::debug!(
            item_id = %item.id,
            category = %item.category,
            %expiration_date,
            "item created"
        );
        Ok(item)
    }

    /// Apply whitelisted field changes to an active item.
    ///
    /// When nothing differs the returned transition is a no-op and
    /// `updated_at` is left alone.
    pub fn update(
        &self,
        item: &InventoryItem,
        update: &ItemUpdate,
        now: DateTime<Utc>,
    ) -> Result<Transition> {
        item.ensure_active_for(LifecycleAction::Update)?;

        let mut next = item.clone();
        let mut changed = false;

        if let Some(name) = &update.name {
            validate_name(name)?;
            changed |= replace(&mut next.name, name.trim().to_string());
        }
        if let Some(quantity) = update.quantity {
            validate_quantity(quantity)?;
            changed |= replace(&mut next.quantity, quantity);
        }
        if let Some(unit) = &update.unit {
            changed |= replace(&mut next.unit, unit.clone());
        }
        if let Some(category) = update.category {
            changed |= replace(&mut next.category, category);
        }
        if let Some(storage) = update.storage {
            changed |= replace(&mut next.storage, storage);
        }
        if let Some(date) = update.expiration_date {
            changed |= replace(&mut next.expiration_date, Some(date));
        }
        if let Some(notes) = &update.notes {
            changed |= replace(&mut next.notes, Some(notes.clone()));
        }
        if let Some(photo_url) = &update.photo_url {
            changed |= replace(&mut next.photo_url, Some(photo_url.clone()));
        }

        if changed {
            touch(&mut next, now);
        }

        Ok(Transition {
            action: LifecycleAction::Update,
            item: next,
            precondition: Precondition::of(item),
            log: None,
        })
    }

    /// Consume all or part of an active item.
    ///
    /// A partial amount reduces the quantity and keeps the item active; the
    /// full amount (or more, or none given) marks it consumed and leaves the
    /// quantity as it was.
    pub fn consume(
        &self,
        item: &InventoryItem,
        actor: &Actor,
        quantity: Option<f64>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Transition> {
        item.ensure_active_for(LifecycleAction::Consume)?;
        if let Some(amount) = quantity {
            validate_quantity(amount)?;
        }

        let consumed = quantity.unwrap_or(item.quantity);
        let mut next = item.clone();
        if consumed < item.quantity {
            next.quantity = item.quantity - consumed;
        } else {
            next.status = ItemStatus::Consumed;
        }
        touch(&mut next, now);

        let entry = ConsumptionLogEntry {
            id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            user_id: actor.user_id.clone(),
            quantity_consumed: consumed,
            consumed_at: now,
            notes,
        };

        tracing::debug!(item_id = %item.id, consumed, status = %next.status, "item consumed");
        Ok(Transition {
            action: LifecycleAction::Consume,
            item: next,
            precondition: Precondition::of(item),
            log: Some(LogEntry::Consumption(entry)),
        })
    }

    /// Mark an active item wasted and price the loss.
    pub fn waste(
        &self,
        item: &InventoryItem,
        actor: &Actor,
        request: WasteRequest,
        now: DateTime<Utc>,
    ) -> Result<Transition> {
        item.ensure_active_for(LifecycleAction::Waste)?;

        let value = estimate_value_with(self.table, item.category, item.quantity, &item.unit);
        let impact = estimate_environmental_impact_with(
            self.table,
            item.category,
            item.quantity,
            &item.unit,
        );

        let mut next = item.clone();
        next.status = ItemStatus::Wasted;
        touch(&mut next, now);

        let entry = WasteLogEntry {
            id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            user_id: actor.user_id.clone(),
            wasted_at: now,
            reason: request.reason,
            quantity: item.quantity,
            feedback_text: request.feedback_text,
            photo_url: request.photo_url,
            estimated_value: value,
            co2_impact_kg: impact.co2_kg,
            water_impact_liters: impact.water_liters,
        };

        tracing::debug!(item_id = %item.id, reason = %request.reason, value, "item wasted");
        Ok(Transition {
            action: LifecycleAction::Waste,
            item: next,
            precondition: Precondition::of(item),
            log: Some(LogEntry::Waste(entry)),
        })
    }

    /// Soft-delete an active item.
    pub fn delete(&self, item: &InventoryItem, now: DateTime<Utc>) -> Result<Transition> {
        item.ensure_active_for(LifecycleAction::Delete)?;

        let mut next = item.clone();
        next.status = ItemStatus::Deleted;
        touch(&mut next, now);

        Ok(Transition {
            action: LifecycleAction::Delete,
            item: next,
            precondition: Precondition::of(item),
            log: None,
        })
    }

    /// Expire an active item whose date is strictly before `today`.
    ///
    /// Returns `None` when the item is not active, has no date, or is not yet
    /// past it.
    pub fn expire(
        &self,
        item: &InventoryItem,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Option<Transition> {
        if !item.is_active() {
            return None;
        }
        let date = item.expiration_date?;
        if date >= today {
            return None;
        }

        let mut next = item.clone();
        next.status = ItemStatus::Expired;
        touch(&mut next, now);

        Some(Transition {
            action: LifecycleAction::Expire,
            item: next,
            precondition: Precondition::of(item),
            log: None,
        })
    }

    /// Plan expiry for every item independently.
    pub fn plan_sweep(
        &self,
        items: &[InventoryItem],
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> SweepPlan {
        let mut plan = SweepPlan::default();
        for item in items {
            match self.expire(item, today, now) {
                Some(transition) => plan.transitions.push(transition),
                None => plan.unchanged += 1,
            }
        }
        plan
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn touch(item: &mut InventoryItem, now: DateTime<Utc>) {
    item.updated_at = now;
    item.revision += 1;
}

fn validate_quantity(quantity: f64) -> Result<(), ValidationError> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveQuantity(quantity))
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".into(),
            message: "must not be empty".into(),
        });
    }
    Ok(())
}
