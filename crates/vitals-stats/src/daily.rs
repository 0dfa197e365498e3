//! Daily Aggregation of Stored Readings

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storage::ReadingRecord;

/// Aggregated vitals for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyVitals {
    pub date: NaiveDate,
    /// Sum of kick counts observed that day
    pub total_kicks: u32,
    /// Mean heartbeat (bpm)
    pub avg_heartbeat: f64,
    /// Mean temperature (°C)
    pub avg_temperature: f64,
    /// Number of readings folded in
    pub samples: usize,
}

/// Rollup over a multi-day window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub total_kicks: u32,
    pub avg_heartbeat: f64,
    pub days: usize,
}

fn record_date(record: &ReadingRecord) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(record.timestamp_ms).map(|dt| dt.date_naive())
}

/// Group readings by calendar day, oldest day first
///
/// Readings with an unrepresentable timestamp are skipped.
pub fn summarize_daily(readings: &[ReadingRecord]) -> Vec<DailyVitals> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&ReadingRecord>> = BTreeMap::new();
    for record in readings {
        if let Some(date) = record_date(record) {
            by_day.entry(date).or_default().push(record);
        }
    }

    by_day
        .into_iter()
        .map(|(date, records)| {
            let samples = records.len();
            let total_kicks = records.iter().map(|r| r.kick_count).sum();
            let avg_heartbeat =
                records.iter().map(|r| r.heartbeat as f64).sum::<f64>() / samples as f64;
            let avg_temperature =
                records.iter().map(|r| r.temperature).sum::<f64>() / samples as f64;

            DailyVitals {
                date,
                total_kicks,
                avg_heartbeat,
                avg_temperature,
                samples,
            }
        })
        .collect()
}

/// Rollup of the daily summaries (the "7-day trends" card)
pub fn weekly_rollup(daily: &[DailyVitals]) -> WeeklySummary {
    if daily.is_empty() {
        return WeeklySummary {
            total_kicks: 0,
            avg_heartbeat: 0.0,
            days: 0,
        };
    }

    let total_kicks = daily.iter().map(|d| d.total_kicks).sum();
    let avg_heartbeat =
        daily.iter().map(|d| d.avg_heartbeat).sum::<f64>() / daily.len() as f64;

    WeeklySummary {
        total_kicks,
        avg_heartbeat,
        days: daily.len(),
    }
}
