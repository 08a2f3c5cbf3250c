//! E2E tests for the expiration and impact commands.

mod common;

use common::{parse_json, Sandbox};
use serde_json::Value;

#[test]
fn test_expiration_dairy_in_fridge() {
    let sandbox = Sandbox::new();
    let out = sandbox.run_cli_success(&[
        "expiration",
        "--category",
        "Dairy",
        "--storage",
        "fridge",
        "--purchased",
        "2024-01-01",
        "--today",
        "2024-01-01",
    ]);
    let json: Value = parse_json(&out);
    assert_eq!(json["category"], "dairy");
    assert_eq!(json["mode"], "standard");
    assert_eq!(json["expiration_date"], "2024-01-08");
    assert_eq!(json["shelf_life_days"], 7);
    assert_eq!(json["days_until_expiry"], 7);
    assert_eq!(json["freshness"], "fresh");
}

#[test]
fn test_expiration_guesses_category_from_name() {
    let sandbox = Sandbox::new();
    let out = sandbox.run_cli_success(&[
        "expiration",
        "--name",
        "Whole Milk 1L",
        "--storage",
        "freezer",
        "--today",
        "2024-01-01",
    ]);
    let json: Value = parse_json(&out);
    assert_eq!(json["category"], "dairy");
    assert_eq!(json["storage"], "freezer");
    assert_eq!(json["expiration_date"], "2024-03-31");
}

#[test]
fn test_expiration_unknown_values_fall_back() {
    let sandbox = Sandbox::new();
    let out = sandbox.run_cli_success(&[
        "expiration",
        "--category",
        "spaceship",
        "--storage",
        "garage",
        "--mode",
        "reckless",
        "--today",
        "2024-01-01",
    ]);
    let json: Value = parse_json(&out);
    assert_eq!(json["category"], "other");
    assert_eq!(json["storage"], "fridge");
    assert_eq!(json["mode"], "standard");
    assert_eq!(json["expiration_date"], "2024-01-15");
}

#[test]
fn test_expiration_past_date_is_expired() {
    let sandbox = Sandbox::new();
    let out = sandbox.run_cli_success(&[
        "expiration",
        "--category",
        "fish",
        "--purchased",
        "2024-01-01",
        "--today",
        "2024-01-10",
    ]);
    let json: Value = parse_json(&out);
    assert_eq!(json["expiration_date"], "2024-01-03");
    assert_eq!(json["days_until_expiry"], -7);
    assert_eq!(json["freshness"], "expired");
    assert_eq!(json["color"], "#F44336");
}

#[test]
fn test_impact_dairy_liters() {
    let sandbox = Sandbox::new();
    let out = sandbox.run_cli_success(&[
        "impact",
        "--category",
        "dairy",
        "--quantity",
        "2",
        "--unit",
        "liter",
    ]);
    let json: Value = parse_json(&out);
    assert_eq!(json["estimated_value"], 4.0);
    assert_eq!(json["co2_kg"], 6.4);
    assert_eq!(json["water_liters"], 2000.0);
}

#[test]
fn test_impact_unknown_unit_uses_piece_price() {
    let sandbox = Sandbox::new();
    let out = sandbox.run_cli_success(&[
        "impact",
        "--category",
        "eggs",
        "--quantity",
        "6",
        "--unit",
        "carton",
    ]);
    let json: Value = parse_json(&out);
    assert_eq!(json["estimated_value"], 1.5);
}

#[test]
fn test_impact_rejects_negative_quantity() {
    let sandbox = Sandbox::new();
    let (_, stderr, code) = sandbox.run_cli_failure(&["impact", "--quantity=-1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}
