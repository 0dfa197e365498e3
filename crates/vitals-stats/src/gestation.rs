//! Gestation Progress Math

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Full-term pregnancy length in weeks
pub const FULL_TERM_WEEKS: i64 = 40;

/// Gestation timeline derived from the pregnancy start date
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Gestation {
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl Gestation {
    /// Derive the timeline from the start date (due = start + 40 weeks)
    pub fn from_start(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            due_date: start_date + Duration::weeks(FULL_TERM_WEEKS),
        }
    }

    /// Current gestation week, capped at full term
    pub fn current_week(&self, today: NaiveDate) -> i64 {
        let weeks = (today - self.start_date).num_weeks();
        weeks.clamp(0, FULL_TERM_WEEKS)
    }

    /// Progress through the pregnancy as a percentage
    pub fn progress_percent(&self, today: NaiveDate) -> f64 {
        self.current_week(today) as f64 / FULL_TERM_WEEKS as f64 * 100.0
    }

    /// Weeks remaining until full term
    pub fn weeks_remaining(&self, today: NaiveDate) -> i64 {
        FULL_TERM_WEEKS - self.current_week(today)
    }
}
