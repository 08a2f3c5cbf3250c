//! Inventory service: lifecycle rules committed against the store collaborators.

use serde::Serialize;

use super::item::{Actor, InventoryItem, ItemStatus, ItemUpdate, NewItem};
use super::lifecycle::{ItemLifecycle, Transition, WasteRequest};
use super::listing::{list_items, InventoryStats, ItemFilter, ItemListing};
use super::logs::LogEntry;
use super::TransitionError;
use crate::clock::Clock;
use crate::error::{CoreError, Result, StoreError};
use crate::store::{ItemStore, LogStore};

/// A log append that failed after its transition was committed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogAppendWarning {
    pub item_id: String,
    pub message: String,
}

/// Result of a committed transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionOutcome {
    pub item: InventoryItem,
    pub log: Option<LogEntry>,
    /// Empty unless the log append failed
    pub warnings: Vec<LogAppendWarning>,
}

/// Per-item failure during a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepFailure {
    pub item_id: String,
    pub error: String,
}

/// Summary of an expiration sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepReport {
    pub checked: usize,
    /// Ids moved to expired by this sweep
    pub expired: Vec<String>,
    /// Items already terminal, not yet overdue, or changed concurrently
    pub skipped: usize,
    pub failures: Vec<SweepFailure>,
}

/// Inventory operations on behalf of an actor.
pub struct Inventory<'a> {
    items: &'a dyn ItemStore,
    logs: &'a dyn LogStore,
    clock: &'a dyn Clock,
    lifecycle: ItemLifecycle,
}

impl<'a> Inventory<'a> {
    pub fn new(items: &'a dyn ItemStore, logs: &'a dyn LogStore, clock: &'a dyn Clock) -> Self {
        Self {
            items,
            logs,
            clock,
            lifecycle: ItemLifecycle::new(),
        }
    }

    pub fn with_lifecycle(mut self, lifecycle: ItemLifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn create(&self, actor: &Actor, new: NewItem) -> Result<InventoryItem> {
        let item = self
            .lifecycle
            .create(actor, new, self.clock.today(), self.clock.now())?;
        self.items.insert(&item)?;
        Ok(item)
    }

    /// Create each item independently; one bad entry does not stop the rest.
    pub fn create_many(&self, actor: &Actor, new: Vec<NewItem>) -> Vec<Result<InventoryItem>> {
        new.into_iter()
            .map(|entry| self.create(actor, entry))
            .collect()
    }

    /// Fetch a visible, non-deleted item.
    pub fn get(&self, actor: &Actor, id: &str) -> Result<InventoryItem> {
        let item = self.load_visible(actor, id)?;
        if item.status == ItemStatus::Deleted {
            return Err(CoreError::not_found("item", id));
        }
        Ok(item)
    }

    pub fn update(&self, actor: &Actor, id: &str, update: &ItemUpdate) -> Result<InventoryItem> {
        let item = self.load_visible(actor, id)?;
        let transition = self.lifecycle.update(&item, update, self.clock.now())?;
        if transition.is_noop() {
            return Ok(item);
        }
        Ok(self.commit(transition)?.item)
    }

    pub fn consume(
        &self,
        actor: &Actor,
        id: &str,
        quantity: Option<f64>,
        notes: Option<String>,
    ) -> Result<TransitionOutcome> {
        let item = self.load_visible(actor, id)?;
        let transition = self
            .lifecycle
            .consume(&item, actor, quantity, notes, self.clock.now())?;
        self.commit(transition)
    }

    pub fn waste(
        &self,
        actor: &Actor,
        id: &str,
        request: WasteRequest,
    ) -> Result<TransitionOutcome> {
        let item = self.load_visible(actor, id)?;
        let transition = self
            .lifecycle
            .waste(&item, actor, request, self.clock.now())?;
        self.commit(transition)
    }

    pub fn delete(&self, actor: &Actor, id: &str) -> Result<InventoryItem> {
        let item = self.load_visible(actor, id)?;
        let transition = self.lifecycle.delete(&item, self.clock.now())?;
        Ok(self.commit(transition)?.item)
    }

    /// Expire every overdue active item in the store.
    ///
    /// Items are committed one by one; a store failure on one item is
    /// recorded in the report and the sweep moves on.
    pub fn sweep_expired(&self) -> Result<SweepReport> {
        let all = self.items.all()?;
        let plan = self
            .lifecycle
            .plan_sweep(&all, self.clock.today(), self.clock.now());

        let mut report = SweepReport {
            checked: all.len(),
            skipped: plan.unchanged,
            ..SweepReport::default()
        };

        for transition in plan.transitions {
            let id = transition.item.id.clone();
            match self.items.compare_and_set(&transition.precondition, &transition.item) {
                Ok(true) => report.expired.push(id),
                Ok(false) => report.skipped += 1,
                Err(e) => {
                    tracing::warn!(item_id = %id, error = %e, "failed to expire item");
                    report.failures.push(SweepFailure {
                        item_id: id,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            checked = report.checked,
            expired = report.expired.len(),
            failures = report.failures.len(),
            "expiration sweep finished"
        );
        Ok(report)
    }

    pub fn list(&self, actor: &Actor, filter: &ItemFilter) -> Result<ItemListing> {
        let all = self.items.all()?;
        Ok(list_items(&all, actor, filter, self.clock.today()))
    }

    pub fn stats(&self, actor: &Actor) -> Result<InventoryStats> {
        let visible: Vec<InventoryItem> = self
            .items
            .all()?
            .into_iter()
            .filter(|item| item.is_visible_to(actor))
            .collect();
        Ok(InventoryStats::compute(&visible, self.clock.today()))
    }

    fn load_visible(&self, actor: &Actor, id: &str) -> Result<InventoryItem> {
        let item = self
            .items
            .get(id)?
            .ok_or_else(|| CoreError::not_found("item", id))?;
        if !item.is_visible_to(actor) {
            return Err(CoreError::Forbidden(format!(
                "item '{id}' is not visible to user '{}'",
                actor.user_id
            )));
        }
        Ok(item)
    }

    fn commit(&self, transition: Transition) -> Result<TransitionOutcome> {
        let Transition {
            action,
            item,
            precondition,
            log,
        } = transition;

        if !self.items.compare_and_set(&precondition, &item)? {
            let current = self
                .items
                .get(&item.id)?
                .map(|current| current.status)
                .unwrap_or(precondition.status);
            return Err(TransitionError {
                item_id: item.id,
                from: current,
                action,
            }
            .into());
        }

        let mut warnings = Vec::new();
        if let Some(entry) = &log {
            if let Err(e) = self.append(entry) {
                tracing::warn!(
                    item_id = %item.id,
                    %action,
                    error = %e,
                    "log append failed after commit"
                );
                warnings.push(LogAppendWarning {
                    item_id: item.id.clone(),
                    message: e.to_string(),
                });
            }
        }

        Ok(TransitionOutcome {
            item,
            log,
            warnings,
        })
    }

    fn append(&self, entry: &LogEntry) -> Result<(), StoreError> {
        match entry {
            LogEntry::Consumption(entry) => self.logs.append_consumption(entry),
            LogEntry::Waste(entry) => self.logs.append_waste(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::inventory::{ConsumptionLogEntry, WasteLogEntry, WasteReason};
    use crate::policy::Category;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    struct BrokenLogs;

    impl LogStore for BrokenLogs {
        fn append_consumption(&self, _: &ConsumptionLogEntry) -> Result<(), StoreError> {
            Err(StoreError::Backend("log table offline".into()))
        }
        fn append_waste(&self, _: &WasteLogEntry) -> Result<(), StoreError> {
            Err(StoreError::Backend("log table offline".into()))
        }
        fn consumption_logs(&self, _: &str) -> Result<Vec<ConsumptionLogEntry>, StoreError> {
            Ok(Vec::new())
        }
        fn waste_logs(&self, _: &str) -> Result<Vec<WasteLogEntry>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn missing_and_foreign_items() {
        let store = MemoryStore::new();
        let clock = clock();
        let inventory = Inventory::new(&store, &store, &clock);
        let alice = Actor::user("alice");

        let err = inventory.consume(&alice, "nope", None, None).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));

        let item = inventory.create(&alice, NewItem::new("Cheese", 1.0)).unwrap();
        let err = inventory
            .waste(&Actor::user("mallory"), &item.id, WasteRequest::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
        assert_eq!(store.get(&item.id).unwrap().unwrap().status, ItemStatus::Active);
    }

    #[test]
    fn log_failure_is_a_warning() {
        let store = MemoryStore::new();
        let clock = clock();
        let inventory = Inventory::new(&store, &BrokenLogs, &clock);
        let alice = Actor::user("alice");

        let item = inventory
            .create(&alice, NewItem::new("Yogurt", 1.0).category(Category::Dairy))
            .unwrap();
        let outcome = inventory
            .waste(&alice, &item.id, WasteRequest::because(WasteReason::Forgot))
            .unwrap();
        assert_eq!(outcome.item.status, ItemStatus::Wasted);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(store.get(&item.id).unwrap().unwrap().status, ItemStatus::Wasted);
    }

    #[test]
    fn deleted_items_disappear_from_reads() {
        let store = MemoryStore::new();
        let clock = clock();
        let inventory = Inventory::new(&store, &store, &clock);
        let alice = Actor::user("alice");

        let item = inventory.create(&alice, NewItem::new("Lettuce", 1.0)).unwrap();
        inventory.delete(&alice, &item.id).unwrap();

        assert!(matches!(
            inventory.get(&alice, &item.id),
            Err(CoreError::NotFound { .. })
        ));
        assert_eq!(inventory.list(&alice, &ItemFilter::default()).unwrap().total, 0);
        assert!(matches!(
            inventory.delete(&alice, &item.id),
            Err(CoreError::InvalidState(_))
        ));
    }

    #[test]
    fn noop_update_does_not_write() {
        let store = MemoryStore::new();
        let clock = clock();
        let inventory = Inventory::new(&store, &store, &clock);
        let alice = Actor::user("alice");

        let item = inventory.create(&alice, NewItem::new("Tofu", 1.0)).unwrap();
        let same = inventory.update(&alice, &item.id, &ItemUpdate::default()).unwrap();
        assert_eq!(same, item);
        assert_eq!(store.get(&item.id).unwrap().unwrap().revision, 0);
    }
}
