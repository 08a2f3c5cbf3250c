//! Storage collaborator traits and an in-memory implementation.
//!
//! The engine never talks to a database directly. Adapters implement these
//! traits; [`MemoryStore`] backs the tests and the CLI.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::analytics::UnlockedAchievement;
use crate::error::StoreError;
use crate::inventory::{ConsumptionLogEntry, InventoryItem, Precondition, WasteLogEntry};

/// Item records keyed by id.
pub trait ItemStore: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<InventoryItem>, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Duplicate`] if the id exists.
    fn insert(&self, item: &InventoryItem) -> Result<(), StoreError>;

    /// Replace the record only if it still satisfies `expected`.
    ///
    /// Returns `Ok(false)` when another writer got there first.
    fn compare_and_set(&self, expected: &Precondition, item: &InventoryItem)
        -> Result<bool, StoreError>;

    fn all(&self) -> Result<Vec<InventoryItem>, StoreError>;
}

/// Append-only consumption and waste logs.
pub trait LogStore: Send + Sync {
    fn append_consumption(&self, entry: &ConsumptionLogEntry) -> Result<(), StoreError>;

    fn append_waste(&self, entry: &WasteLogEntry) -> Result<(), StoreError>;

    fn consumption_logs(&self, user_id: &str) -> Result<Vec<ConsumptionLogEntry>, StoreError>;

    fn waste_logs(&self, user_id: &str) -> Result<Vec<WasteLogEntry>, StoreError>;
}

/// Unlocked achievement rows, at most one per (user, achievement).
pub trait AchievementStore: Send + Sync {
    fn unlocked(&self, user_id: &str) -> Result<Vec<UnlockedAchievement>, StoreError>;

    /// Insert unless a row for the same (user, achievement) exists.
    ///
    /// Returns whether a row was written.
    fn insert_if_absent(&self, row: &UnlockedAchievement) -> Result<bool, StoreError>;
}

/// Mutex-guarded in-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, InventoryItem>>,
    consumption: Mutex<Vec<ConsumptionLogEntry>>,
    waste: Mutex<Vec<WasteLogEntry>>,
    achievements: Mutex<Vec<UnlockedAchievement>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `items`, e.g. loaded from a JSON file.
    pub fn with_items(items: impl IntoIterator<Item = InventoryItem>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.items.lock() {
            map.extend(items.into_iter().map(|item| (item.id.clone(), item)));
        }
        store
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex.lock().map_err(|_| StoreError::Poisoned)
}

impl ItemStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<InventoryItem>, StoreError> {
        Ok(lock(&self.items)?.get(id).cloned())
    }

    fn insert(&self, item: &InventoryItem) -> Result<(), StoreError> {
        let mut items = lock(&self.items)?;
        if items.contains_key(&item.id) {
            return Err(StoreError::Duplicate(item.id.clone()));
        }
        items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    fn compare_and_set(
        &self,
        expected: &Precondition,
        item: &InventoryItem,
    ) -> Result<bool, StoreError> {
        let mut items = lock(&self.items)?;
        match items.get_mut(&item.id) {
            Some(current) if expected.holds_for(current) => {
                *current = item.clone();
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(StoreError::Backend(format!("item '{}' vanished", item.id))),
        }
    }

    fn all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        Ok(lock(&self.items)?.values().cloned().collect())
    }
}

impl LogStore for MemoryStore {
    fn append_consumption(&self, entry: &ConsumptionLogEntry) -> Result<(), StoreError> {
        lock(&self.consumption)?.push(entry.clone());
        Ok(())
    }

    fn append_waste(&self, entry: &WasteLogEntry) -> Result<(), StoreError> {
        lock(&self.waste)?.push(entry.clone());
        Ok(())
    }

    fn consumption_logs(&self, user_id: &str) -> Result<Vec<ConsumptionLogEntry>, StoreError> {
        Ok(lock(&self.consumption)?
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }

    fn waste_logs(&self, user_id: &str) -> Result<Vec<WasteLogEntry>, StoreError> {
        Ok(lock(&self.waste)?
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl AchievementStore for MemoryStore {
    fn unlocked(&self, user_id: &str) -> Result<Vec<UnlockedAchievement>, StoreError> {
        Ok(lock(&self.achievements)?
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    fn insert_if_absent(&self, row: &UnlockedAchievement) -> Result<bool, StoreError> {
        let mut rows = lock(&self.achievements)?;
        let exists = rows
            .iter()
            .any(|r| r.user_id == row.user_id && r.achievement_id == row.achievement_id);
        if exists {
            return Ok(false);
        }
        rows.push(row.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Actor, ItemLifecycle, NewItem};
    use chrono::{NaiveDate, Utc};

    fn item() -> InventoryItem {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ItemLifecycle::new()
            .create(&Actor::user("u1"), NewItem::new("Bread", 1.0), today, Utc::now())
            .unwrap()
    }

    #[test]
    fn insert_rejects_duplicates() {
        let store = MemoryStore::new();
        let item = item();
        store.insert(&item).unwrap();
        assert_eq!(
            store.insert(&item),
            Err(StoreError::Duplicate(item.id.clone()))
        );
        assert_eq!(store.get(&item.id).unwrap(), Some(item));
    }

    #[test]
    fn compare_and_set_checks_revision() {
        let store = MemoryStore::new();
        let original = item();
        store.insert(&original).unwrap();

        let expected = Precondition::of(&original);
        let mut next = original.clone();
        next.quantity = 0.5;
        next.revision += 1;
        assert!(store.compare_and_set(&expected, &next).unwrap());

        // A second writer holding the stale precondition loses.
        let mut stale = original.clone();
        stale.quantity = 0.25;
        stale.revision += 1;
        assert!(!store.compare_and_set(&expected, &stale).unwrap());
        assert_eq!(store.get(&original.id).unwrap().unwrap().quantity, 0.5);
    }

    #[test]
    fn achievement_insert_is_idempotent() {
        let store = MemoryStore::new();
        let row = UnlockedAchievement {
            user_id: "u1".into(),
            achievement_id: "first_save".into(),
            unlocked_at: Utc::now(),
        };
        assert!(store.insert_if_absent(&row).unwrap());
        assert!(!store.insert_if_absent(&row).unwrap());
        assert_eq!(store.unlocked("u1").unwrap().len(), 1);
        assert!(store.unlocked("u2").unwrap().is_empty());
    }
}
