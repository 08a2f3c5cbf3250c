//! E2E tests for analytics commands.

mod common;

use common::{parse_json, Sandbox};
use serde_json::{json, Value};

fn daily_rows() -> String {
    let rows: Vec<Value> = (1..=8)
        .map(|day| {
            let (waste_count, waste_cost) = if day == 1 { (1, 2.5) } else { (0, 0.0) };
            json!({
                "user_id": "u1",
                "date": format!("2024-04-{day:02}"),
                "items_saved": 2,
                "money_saved": 6.0,
                "waste_count": waste_count,
                "waste_cost": waste_cost,
            })
        })
        .collect();
    serde_json::to_string(&rows).unwrap()
}

fn log_entries() -> String {
    json!([
        {
            "kind": "consumption",
            "id": "c1",
            "item_id": "i1",
            "user_id": "u1",
            "quantity_consumed": 1.0,
            "consumed_at": "2024-04-08T10:00:00Z"
        },
        {
            "kind": "consumption",
            "id": "c2",
            "item_id": "i2",
            "user_id": "u2",
            "quantity_consumed": 1.0,
            "consumed_at": "2024-04-08T11:00:00Z"
        },
        {
            "kind": "waste",
            "id": "w1",
            "item_id": "i3",
            "user_id": "u1",
            "wasted_at": "2024-04-08T12:00:00Z",
            "reason": "spoiled",
            "quantity": 1.0,
            "estimated_value": 3.0,
            "co2_impact_kg": 0.48,
            "water_impact_liters": 150.0
        }
    ])
    .to_string()
}

#[test]
fn test_summary_from_daily_rows() {
    let sandbox = Sandbox::new();
    let daily = sandbox.write("daily.json", &daily_rows());

    let summary: Value =
        parse_json(&sandbox.run_cli_success(&["analytics", "summary", "--daily", &daily]));
    assert_eq!(summary["items_saved"], 16);
    assert_eq!(summary["money_saved"], 48.0);
    assert_eq!(summary["current_streak"], 7);
    assert_eq!(summary["best_streak"], 7);
    assert_eq!(summary["waste_count"], 1);
    assert_eq!(summary["source"], "daily_aggregates");
}

#[test]
fn test_summary_falls_back_to_logs() {
    let sandbox = Sandbox::new();
    let logs = sandbox.write("logs.json", &log_entries());

    let summary: Value = parse_json(&sandbox.run_cli_success(&[
        "analytics", "summary", "--logs", &logs, "--user", "u1",
    ]));
    assert_eq!(summary["items_saved"], 1);
    assert_eq!(summary["money_saved"], 3.0);
    assert_eq!(summary["waste_count"], 1);
    assert_eq!(summary["waste_cost"], 3.0);
    assert_eq!(summary["current_streak"], 0);
    assert_eq!(summary["source"], "log_fallback");
}

#[test]
fn test_aggregate_row_from_logs() {
    let sandbox = Sandbox::new();
    let logs = sandbox.write("logs.json", &log_entries());

    let row: Value = parse_json(&sandbox.run_cli_success(&[
        "analytics", "aggregate", "--logs", &logs, "--user", "u1", "--date", "2024-04-08",
    ]));
    assert_eq!(row["date"], "2024-04-08");
    assert_eq!(row["items_saved"], 1);
    assert_eq!(row["co2_prevented_kg"], 2.5);
    assert_eq!(row["water_saved_liters"], 1000.0);
    assert_eq!(row["waste_cost"], 3.0);
}

#[test]
fn test_achievements_unlock_once() {
    let sandbox = Sandbox::new();
    let daily = sandbox.write("daily.json", &daily_rows());
    let unlocked = sandbox.path("unlocked.json").to_string_lossy().into_owned();
    let args = [
        "analytics", "achievements", "--daily", &daily, "--user", "u1", "--unlocked", &unlocked,
        "--today", "2024-04-08",
    ];

    let first: Value = parse_json(&sandbox.run_cli_success(&args));
    let ids: Vec<&str> = first["newly_unlocked"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["first_save", "week_streak_7", "saved_10"]);
    assert_eq!(first["unlocked_count"], 3);
    assert_eq!(first["total_count"], 10);

    let stored: Vec<Value> = parse_json(&sandbox.read("unlocked.json"));
    assert_eq!(stored.len(), 3);

    let second: Value = parse_json(&sandbox.run_cli_success(&args));
    assert!(second["newly_unlocked"].as_array().unwrap().is_empty());
    assert_eq!(second["unlocked_count"], 3);
    let stored: Vec<Value> = parse_json(&sandbox.read("unlocked.json"));
    assert_eq!(stored.len(), 3);
}

#[test]
fn test_achievements_need_a_user() {
    let sandbox = Sandbox::new();
    let unlocked = sandbox.path("unlocked.json").to_string_lossy().into_owned();
    let (_, stderr, _) =
        sandbox.run_cli_failure(&["analytics", "achievements", "--unlocked", &unlocked]);
    assert!(stderr.contains("--user"));
}

#[test]
fn test_week_report() {
    let sandbox = Sandbox::new();
    let daily = sandbox.write("daily.json", &daily_rows());

    let report: Value = parse_json(&sandbox.run_cli_success(&[
        "analytics", "report", "--daily", &daily, "--period", "week", "--today", "2024-04-08",
    ]));
    assert_eq!(report["period"], "week");
    assert_eq!(report["start_date"], "2024-04-01");
    assert_eq!(report["daily"].as_array().unwrap().len(), 8);
    assert_eq!(report["daily"][0]["items_wasted"], 1);

    let (_, stderr, _) = sandbox.run_cli_failure(&[
        "analytics", "report", "--daily", &daily, "--period", "decade",
    ]);
    assert!(stderr.contains("Unknown period"));
}

#[test]
fn test_insights_default_tip() {
    let sandbox = Sandbox::new();
    let insights: Vec<Value> = parse_json(&sandbox.run_cli_success(&["analytics", "insights"]));
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0]["type"], "tip");
    assert_eq!(insights[0]["title"], "Track Your Groceries");
}

#[test]
fn test_insights_progress() {
    let sandbox = Sandbox::new();
    let daily = sandbox.write("daily.json", &daily_rows());
    let insights: Vec<Value> =
        parse_json(&sandbox.run_cli_success(&["analytics", "insights", "--daily", &daily]));
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0]["type"], "achievement");
}
