pub mod analytics;
pub mod completions;
pub mod config;
pub mod expiration;
pub mod impact;
pub mod items;
pub mod recipes;

use chrono::NaiveDate;
use freshkeep_core::{Clock, SystemClock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Read a JSON document, naming the file in the error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("invalid JSON in {}: {e}", path.display()))?;
    Ok(value)
}

/// Like [`read_json`], but a missing file yields the default value.
pub fn read_json_or_default<T: DeserializeOwned + Default>(
    path: &Path,
) -> Result<T, Box<dyn std::error::Error>> {
    if path.exists() {
        read_json(path)
    } else {
        Ok(T::default())
    }
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> CliResult {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json + "\n")
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `--today` override, or the system date.
pub fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| SystemClock.today())
}
