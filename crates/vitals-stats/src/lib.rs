//! Vitals Statistics
//!
//! Aggregations over stored readings (daily totals, weekly rollup) and
//! gestation progress math for the pregnancy header.

mod daily;
mod gestation;

pub use daily::{summarize_daily, weekly_rollup, DailyVitals, WeeklySummary};
pub use gestation::{Gestation, FULL_TERM_WEEKS};
