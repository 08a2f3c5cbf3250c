//! Inventory commands over a JSON file holding an array of items.
//!
//! Mutating commands load the file into an in-memory store, run the
//! operation and write the store back. Consume and waste can also append
//! their log entry to an activity log file that `analytics` reads.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use freshkeep_core::freshness::expiring_within;
use freshkeep_core::inventory::{ItemFilter, ItemView, LogEntry, WasteRequest};
use freshkeep_core::{
    guess_category, Actor, Category, Clock, Config, FixedClock, Inventory, InventoryItem,
    ItemStatus, ItemStore, MemoryStore, NewItem, StorageLocation, SystemClock, WasteReason,
};
use std::path::{Path, PathBuf};

use super::{print_json, read_json_or_default, today_or_now, write_json, CliResult};

#[derive(Args)]
pub struct FileArgs {
    /// Items JSON file
    #[arg(long, short = 'f')]
    file: PathBuf,
    /// Override today's date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Args)]
pub struct ActorArgs {
    /// Acting user id
    #[arg(long)]
    user: String,
    /// Family the user belongs to
    #[arg(long)]
    family: Option<String>,
}

impl ActorArgs {
    fn actor(&self) -> Actor {
        match &self.family {
            Some(family) => Actor::family_member(self.user.clone(), family.clone()),
            None => Actor::user(self.user.clone()),
        }
    }
}

#[derive(Subcommand)]
pub enum ItemsAction {
    /// Add an item
    Add {
        #[command(flatten)]
        file: FileArgs,
        #[command(flatten)]
        actor: ActorArgs,
        name: String,
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,
        #[arg(long, default_value = "piece")]
        unit: String,
        /// Category; guessed from the name when omitted
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "fridge")]
        storage: String,
        #[arg(long)]
        purchased: Option<NaiveDate>,
        /// Explicit expiration date; computed when omitted
        #[arg(long)]
        expires: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Consume all or part of an item
    Consume {
        #[command(flatten)]
        file: FileArgs,
        #[command(flatten)]
        actor: ActorArgs,
        id: String,
        /// Amount consumed; the whole item when omitted
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
        /// Activity log JSON file to append the consumption entry to
        #[arg(long)]
        logs: Option<PathBuf>,
    },
    /// Record an item as wasted
    Waste {
        #[command(flatten)]
        file: FileArgs,
        #[command(flatten)]
        actor: ActorArgs,
        id: String,
        /// forgot, spoiled, tasted_bad, too_much, changed_plans, other
        #[arg(long, default_value = "forgot")]
        reason: String,
        #[arg(long)]
        feedback: Option<String>,
        /// Activity log JSON file to append the waste entry to
        #[arg(long)]
        logs: Option<PathBuf>,
    },
    /// Soft-delete an item
    Delete {
        #[command(flatten)]
        file: FileArgs,
        #[command(flatten)]
        actor: ActorArgs,
        id: String,
    },
    /// Mark overdue active items as expired
    Sweep {
        #[command(flatten)]
        file: FileArgs,
        /// Report without writing the file
        #[arg(long)]
        dry_run: bool,
    },
    /// List visible items, soonest expiry first
    List {
        #[command(flatten)]
        file: FileArgs,
        #[command(flatten)]
        actor: ActorArgs,
        #[arg(long, default_value = "active")]
        status: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        storage: Option<String>,
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Inventory statistics
    Stats {
        #[command(flatten)]
        file: FileArgs,
        #[command(flatten)]
        actor: ActorArgs,
    },
    /// Active items expiring within a number of days
    Expiring {
        #[command(flatten)]
        file: FileArgs,
        #[command(flatten)]
        actor: ActorArgs,
        /// Defaults to expiration.expiring_window_days
        #[arg(long)]
        days: Option<i64>,
    },
}

fn load_store(path: &Path) -> Result<MemoryStore, Box<dyn std::error::Error>> {
    let items: Vec<InventoryItem> = read_json_or_default(path)?;
    tracing::debug!(path = %path.display(), count = items.len(), "items loaded");
    Ok(MemoryStore::with_items(items))
}

fn save_store(path: &Path, store: &MemoryStore) -> CliResult {
    write_json(path, &store.all()?)
}

/// Append `entry` to the log file, creating it when missing.
fn append_log(path: &Path, entry: &LogEntry) -> CliResult {
    let mut entries: Vec<LogEntry> = read_json_or_default(path)?;
    entries.push(entry.clone());
    write_json(path, &entries)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "activity log updated");
    Ok(())
}

fn clock(today: Option<NaiveDate>) -> Box<dyn Clock> {
    match today {
        Some(date) => Box::new(FixedClock::on(date)),
        None => Box::new(SystemClock),
    }
}

pub fn run(action: ItemsAction) -> CliResult {
    let config = Config::load_or_default();

    match action {
        ItemsAction::Add {
            file,
            actor,
            name,
            quantity,
            unit,
            category,
            storage,
            purchased,
            expires,
            notes,
        } => {
            let store = load_store(&file.file)?;
            let clock = clock(file.today);
            let inventory =
                Inventory::new(&store, &store, clock.as_ref()).with_lifecycle(config.lifecycle());

            let category = match category {
                Some(category) => Category::parse_lenient(&category),
                None => guess_category(&name),
            };
            let mut new = NewItem::new(name, quantity)
                .unit(unit)
                .category(category)
                .storage(StorageLocation::parse_lenient(&storage));
            if let Some(date) = purchased {
                new = new.purchased_on(date);
            }
            if let Some(date) = expires {
                new = new.expires_on(date);
            }
            new.notes = notes;

            let item = inventory.create(&actor.actor(), new)?;
            save_store(&file.file, &store)?;
            print_json(&item)?;
        }
        ItemsAction::Consume {
            file,
            actor,
            id,
            quantity,
            notes,
            logs,
        } => {
            let store = load_store(&file.file)?;
            let clock = clock(file.today);
            let inventory = Inventory::new(&store, &store, clock.as_ref());

            let outcome = inventory.consume(&actor.actor(), &id, quantity, notes)?;
            save_store(&file.file, &store)?;
            if let (Some(path), Some(entry)) = (&logs, &outcome.log) {
                append_log(path, entry)?;
            }
            print_json(&outcome)?;
        }
        ItemsAction::Waste {
            file,
            actor,
            id,
            reason,
            feedback,
            logs,
        } => {
            let reason: WasteReason = reason.parse()?;
            let store = load_store(&file.file)?;
            let clock = clock(file.today);
            let inventory = Inventory::new(&store, &store, clock.as_ref());

            let request = WasteRequest {
                reason,
                feedback_text: feedback,
                photo_url: None,
            };
            let outcome = inventory.waste(&actor.actor(), &id, request)?;
            save_store(&file.file, &store)?;
            if let (Some(path), Some(entry)) = (&logs, &outcome.log) {
                append_log(path, entry)?;
            }
            print_json(&outcome)?;
        }
        ItemsAction::Delete { file, actor, id } => {
            let store = load_store(&file.file)?;
            let clock = clock(file.today);
            let inventory = Inventory::new(&store, &store, clock.as_ref());

            let item = inventory.delete(&actor.actor(), &id)?;
            save_store(&file.file, &store)?;
            print_json(&item)?;
        }
        ItemsAction::Sweep { file, dry_run } => {
            let store = load_store(&file.file)?;
            let clock = clock(file.today);
            let inventory = Inventory::new(&store, &store, clock.as_ref());

            let report = inventory.sweep_expired()?;
            if !dry_run {
                save_store(&file.file, &store)?;
            }
            print_json(&report)?;
        }
        ItemsAction::List {
            file,
            actor,
            status,
            category,
            storage,
            search,
            offset,
            limit,
        } => {
            let store = load_store(&file.file)?;
            let clock = clock(file.today);
            let inventory = Inventory::new(&store, &store, clock.as_ref());

            let filter = ItemFilter {
                status: status.parse::<ItemStatus>()?,
                category: category.map(|c| c.parse::<Category>()).transpose()?,
                storage: storage.map(|s| s.parse::<StorageLocation>()).transpose()?,
                search,
                offset,
                limit,
            };
            print_json(&inventory.list(&actor.actor(), &filter)?)?;
        }
        ItemsAction::Stats { file, actor } => {
            let store = load_store(&file.file)?;
            let clock = clock(file.today);
            let inventory = Inventory::new(&store, &store, clock.as_ref());

            print_json(&inventory.stats(&actor.actor())?)?;
        }
        ItemsAction::Expiring { file, actor, days } => {
            let store = load_store(&file.file)?;
            let today = today_or_now(file.today);
            let actor = actor.actor();
            let days = days.unwrap_or(config.expiration.expiring_window_days);

            let active: Vec<InventoryItem> = store
                .all()?
                .into_iter()
                .filter(|item| item.is_active() && item.is_visible_to(&actor))
                .collect();
            let views: Vec<ItemView> = expiring_within(&active, today, days)
                .into_iter()
                .map(|item| ItemView::new(item.clone(), today))
                .collect();
            print_json(&views)?;
        }
    }
    Ok(())
}
