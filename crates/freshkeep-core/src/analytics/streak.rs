//! No-waste streaks over daily aggregates.
//!
//! A day counts toward a streak when its `waste_count` is zero. Rows may be
//! passed in any order; both functions sort by date first.

use super::daily::DailyAggregate;

fn by_date(rows: &[DailyAggregate]) -> Vec<&DailyAggregate> {
    let mut sorted: Vec<&DailyAggregate> = rows.iter().collect();
    sorted.sort_by_key(|row| row.date);
    sorted
}

/// Consecutive waste-free days counted back from the most recent row.
pub fn current_streak(rows: &[DailyAggregate]) -> u32 {
    by_date(rows)
        .into_iter()
        .rev()
        .take_while(|row| row.waste_count == 0)
        .count() as u32
}

/// Longest run of waste-free days anywhere in the series.
pub fn best_streak(rows: &[DailyAggregate]) -> u32 {
    let mut best = 0;
    let mut run = 0;
    for row in by_date(rows) {
        if row.waste_count == 0 {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}
