//! Integration tests for the inventory lifecycle.
//!
//! Drives [`Inventory`] against the in-memory store: creation with computed
//! expiry, waste accounting, family visibility, concurrent transitions and
//! the expiration sweep.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Barrier;

use chrono::NaiveDate;
use freshkeep_core::inventory::{
    InventoryItem, ItemFilter, ItemUpdate, LogEntry, Precondition, WasteRequest,
};
use freshkeep_core::{
    Actor, Category, CoreError, ExpirationMode, FixedClock, Inventory, ItemLifecycle, ItemStatus,
    ItemStore, LogStore, MemoryStore, NewItem, StorageLocation, StoreError, WasteReason,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_dairy_waste_workflow() {
    let store = MemoryStore::new();
    let clock = FixedClock::on(date(2024, 1, 1));
    let inventory = Inventory::new(&store, &store, &clock);
    let alice = Actor::user("alice");

    let milk = inventory
        .create(
            &alice,
            NewItem::new("Milk", 1.0)
                .category(Category::Dairy)
                .storage(StorageLocation::Fridge),
        )
        .unwrap();
    assert_eq!(milk.purchase_date, date(2024, 1, 1));
    assert_eq!(milk.expiration_date, Some(date(2024, 1, 8)));
    assert_eq!(milk.status, ItemStatus::Active);

    let outcome = inventory
        .waste(&alice, &milk.id, WasteRequest::because(WasteReason::Spoiled))
        .unwrap();
    assert_eq!(outcome.item.status, ItemStatus::Wasted);
    assert!(outcome.warnings.is_empty());
    match outcome.log {
        Some(LogEntry::Waste(entry)) => {
            assert_eq!(entry.reason, WasteReason::Spoiled);
            assert_eq!(entry.estimated_value, 3.0);
        }
        other => panic!("expected a waste log, got {other:?}"),
    }

    let logs = store.waste_logs("alice").unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].estimated_value, 3.0);

    let again = inventory.waste(&alice, &milk.id, WasteRequest::default());
    assert!(matches!(again, Err(CoreError::InvalidState(_))));
    assert_eq!(store.waste_logs("alice").unwrap().len(), 1);
}

#[test]
fn test_partial_then_full_consumption() {
    let store = MemoryStore::new();
    let clock = FixedClock::on(date(2024, 3, 10));
    let inventory = Inventory::new(&store, &store, &clock);
    let bob = Actor::user("bob");

    let eggs = inventory
        .create(&bob, NewItem::new("Eggs", 12.0).category(Category::Eggs))
        .unwrap();

    let partial = inventory.consume(&bob, &eggs.id, Some(4.0), None).unwrap();
    assert_eq!(partial.item.status, ItemStatus::Active);
    assert_eq!(partial.item.quantity, 8.0);

    let full = inventory
        .consume(&bob, &eggs.id, None, Some("omelette".into()))
        .unwrap();
    assert_eq!(full.item.status, ItemStatus::Consumed);
    assert_eq!(full.item.quantity, 8.0);

    let logs = store.consumption_logs("bob").unwrap();
    let amounts: Vec<f64> = logs.iter().map(|l| l.quantity_consumed).collect();
    assert_eq!(amounts, vec![4.0, 8.0]);

    let rejected = inventory.consume(&bob, &eggs.id, Some(0.0), None);
    assert!(rejected.is_err());
}

#[test]
fn test_family_visibility_and_ownership() {
    let store = MemoryStore::new();
    let clock = FixedClock::on(date(2024, 5, 1));
    let inventory = Inventory::new(&store, &store, &clock);

    let parent = Actor::family_member("parent", "fam-1");
    let child = Actor::family_member("child", "fam-1");
    let neighbour = Actor::user("neighbour");

    let bread = inventory
        .create(&parent, NewItem::new("Bread", 1.0).category(Category::Bread))
        .unwrap();

    assert_eq!(inventory.get(&child, &bread.id).unwrap().name, "Bread");
    assert!(matches!(
        inventory.get(&neighbour, &bread.id),
        Err(CoreError::Forbidden(_))
    ));
    assert!(matches!(
        inventory.get(&neighbour, "missing"),
        Err(CoreError::NotFound { .. })
    ));

    let update = ItemUpdate {
        quantity: Some(2.0),
        ..ItemUpdate::default()
    };
    let updated = inventory.update(&child, &bread.id, &update).unwrap();
    assert_eq!(updated.quantity, 2.0);

    inventory.delete(&child, &bread.id).unwrap();
    assert!(matches!(
        inventory.get(&parent, &bread.id),
        Err(CoreError::NotFound { .. })
    ));
    assert!(matches!(
        inventory.delete(&parent, &bread.id),
        Err(CoreError::InvalidState(_))
    ));
}

#[test]
fn test_concurrent_consume_commits_once() {
    let store = MemoryStore::new();
    let clock = FixedClock::on(date(2024, 2, 2));
    let inventory = Inventory::new(&store, &store, &clock);
    let actor = Actor::family_member("a", "fam");

    let cheese = inventory
        .create(&actor, NewItem::new("Cheese", 1.0).category(Category::Dairy))
        .unwrap();

    let barrier = Barrier::new(4);
    let results: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let inventory = &inventory;
                let barrier = &barrier;
                let id = cheese.id.clone();
                scope.spawn(move || {
                    let member = Actor::family_member(format!("member-{n}"), "fam");
                    barrier.wait();
                    match inventory.consume(&member, &id, None, None) {
                        Ok(_) => true,
                        Err(CoreError::InvalidState(_)) => false,
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|won| **won).count(), 1);
    let logged: usize = (0..4)
        .map(|n| store.consumption_logs(&format!("member-{n}")).unwrap().len())
        .sum();
    assert_eq!(logged, 1);
}

#[test]
fn test_expiration_sweep() {
    let store = MemoryStore::new();
    let created_on = FixedClock::on(date(2024, 1, 1));
    let setup = Inventory::new(&store, &store, &created_on);
    let user = Actor::user("carol");

    let old = setup
        .create(&user, NewItem::new("Yogurt", 1.0).expires_on(date(2024, 1, 4)))
        .unwrap();
    let spinach = setup
        .create(&user, NewItem::new("Spinach", 1.0).expires_on(date(2024, 1, 10)))
        .unwrap();
    let eaten = setup
        .create(&user, NewItem::new("Ham", 1.0).expires_on(date(2024, 1, 2)))
        .unwrap();
    setup.consume(&user, &eaten.id, None, None).unwrap();

    let later = FixedClock::on(date(2024, 1, 10));
    let inventory = Inventory::new(&store, &store, &later);

    let report = inventory.sweep_expired().unwrap();
    assert_eq!(report.checked, 3);
    assert_eq!(report.expired, vec![old.id.clone()]);
    assert_eq!(report.skipped, 2);
    assert!(report.failures.is_empty());

    assert_eq!(inventory.get(&user, &old.id).unwrap().status, ItemStatus::Expired);
    assert_eq!(inventory.get(&user, &spinach.id).unwrap().status, ItemStatus::Active);

    let second = inventory.sweep_expired().unwrap();
    assert!(second.expired.is_empty());
}

/// Item store whose writes fail for one id.
struct BrokenRecord {
    inner: MemoryStore,
    broken_id: String,
}

impl ItemStore for BrokenRecord {
    fn get(&self, id: &str) -> Result<Option<InventoryItem>, StoreError> {
        self.inner.get(id)
    }

    fn insert(&self, item: &InventoryItem) -> Result<(), StoreError> {
        self.inner.insert(item)
    }

    fn compare_and_set(
        &self,
        expected: &Precondition,
        item: &InventoryItem,
    ) -> Result<bool, StoreError> {
        if item.id == self.broken_id {
            return Err(StoreError::Backend("disk full".into()));
        }
        self.inner.compare_and_set(expected, item)
    }

    fn all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        self.inner.all()
    }
}

/// Item store where the owner consumes one item right after the sweep has
/// read its snapshot.
struct ConsumedMidSweep {
    inner: MemoryStore,
    target_id: String,
    owner: Actor,
    fired: AtomicBool,
}

impl ItemStore for ConsumedMidSweep {
    fn get(&self, id: &str) -> Result<Option<InventoryItem>, StoreError> {
        self.inner.get(id)
    }

    fn insert(&self, item: &InventoryItem) -> Result<(), StoreError> {
        self.inner.insert(item)
    }

    fn compare_and_set(
        &self,
        expected: &Precondition,
        item: &InventoryItem,
    ) -> Result<bool, StoreError> {
        self.inner.compare_and_set(expected, item)
    }

    fn all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let snapshot = self.inner.all()?;
        if !self.fired.swap(true, Ordering::SeqCst) {
            let clock = FixedClock::on(date(2024, 1, 10));
            Inventory::new(&self.inner, &self.inner, &clock)
                .consume(&self.owner, &self.target_id, None, None)
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        Ok(snapshot)
    }
}

#[test]
fn test_sweep_continues_past_a_failing_item() {
    let inner = MemoryStore::new();
    let created_on = FixedClock::on(date(2024, 1, 1));
    let user = Actor::user("erin");
    let setup = Inventory::new(&inner, &inner, &created_on);
    let ids: Vec<String> = ["Yogurt", "Cream", "Kefir"]
        .iter()
        .map(|name| {
            setup
                .create(&user, NewItem::new(*name, 1.0).expires_on(date(2024, 1, 3)))
                .unwrap()
                .id
        })
        .collect();

    let store = BrokenRecord {
        inner,
        broken_id: ids[1].clone(),
    };
    let later = FixedClock::on(date(2024, 1, 10));
    let inventory = Inventory::new(&store, &store.inner, &later);

    let report = inventory.sweep_expired().unwrap();
    assert_eq!(report.checked, 3);
    assert_eq!(report.expired.len(), 2);
    assert!(report.expired.contains(&ids[0]));
    assert!(report.expired.contains(&ids[2]));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].item_id, ids[1]);
    assert!(report.failures[0].error.contains("disk full"));

    assert_eq!(inventory.get(&user, &ids[0]).unwrap().status, ItemStatus::Expired);
    assert_eq!(inventory.get(&user, &ids[1]).unwrap().status, ItemStatus::Active);
    assert_eq!(inventory.get(&user, &ids[2]).unwrap().status, ItemStatus::Expired);
}

#[test]
fn test_sweep_skips_item_consumed_after_planning() {
    let inner = MemoryStore::new();
    let created_on = FixedClock::on(date(2024, 1, 1));
    let user = Actor::user("frank");
    let setup = Inventory::new(&inner, &inner, &created_on);
    let soup = setup
        .create(&user, NewItem::new("Soup", 1.0).expires_on(date(2024, 1, 3)))
        .unwrap();
    let salad = setup
        .create(&user, NewItem::new("Salad", 1.0).expires_on(date(2024, 1, 3)))
        .unwrap();

    let store = ConsumedMidSweep {
        inner,
        target_id: soup.id.clone(),
        owner: user.clone(),
        fired: AtomicBool::new(false),
    };
    let later = FixedClock::on(date(2024, 1, 10));
    let inventory = Inventory::new(&store, &store.inner, &later);

    let report = inventory.sweep_expired().unwrap();
    assert_eq!(report.checked, 2);
    assert_eq!(report.expired, vec![salad.id.clone()]);
    assert_eq!(report.skipped, 1);
    assert!(report.failures.is_empty());

    assert_eq!(inventory.get(&user, &soup.id).unwrap().status, ItemStatus::Consumed);
    assert_eq!(inventory.get(&user, &salad.id).unwrap().status, ItemStatus::Expired);
}

#[test]
fn test_listing_and_stats_over_store() {
    let store = MemoryStore::new();
    let clock = FixedClock::on(date(2024, 6, 1));
    let inventory = Inventory::new(&store, &store, &clock);
    let dave = Actor::user("dave");

    inventory
        .create(&dave, NewItem::new("Old milk", 1.0).expires_on(date(2024, 5, 30)))
        .unwrap();
    inventory
        .create(&dave, NewItem::new("Fresh milk", 1.0).expires_on(date(2024, 6, 2)))
        .unwrap();
    inventory
        .create(&dave, NewItem::new("Rice", 1.0).category(Category::Grains))
        .unwrap();
    inventory
        .create(&Actor::user("erin"), NewItem::new("Erin's milk", 1.0))
        .unwrap();

    let listing = inventory.list(&dave, &ItemFilter::default()).unwrap();
    assert_eq!(listing.total, 3);
    assert_eq!(listing.expired_count, 1);
    assert_eq!(listing.expiring_count, 1);
    let names: Vec<&str> = listing.items.iter().map(|v| v.item.name.as_str()).collect();
    assert_eq!(names, vec!["Old milk", "Fresh milk", "Rice"]);

    let stats = inventory.stats(&dave).unwrap();
    assert_eq!(stats.total_items, 3);
    assert_eq!(stats.expired_count, 1);
}

#[test]
fn test_conservative_mode_shortens_shelf_life() {
    let store = MemoryStore::new();
    let clock = FixedClock::on(date(2024, 1, 1));
    let inventory = Inventory::new(&store, &store, &clock)
        .with_lifecycle(ItemLifecycle::with_mode(ExpirationMode::Conservative));

    let milk = inventory
        .create(&Actor::user("u"), NewItem::new("Milk", 1.0).category(Category::Dairy))
        .unwrap();
    // 7 days * 0.7 truncates to 4.
    assert_eq!(milk.expiration_date, Some(date(2024, 1, 5)));
}
