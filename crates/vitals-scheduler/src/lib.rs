//! Vitals Polling Scheduler
//!
//! Polls each characteristic of the connected wearable at its own rate and
//! assembles the results into `DeviceReading` frames for the rest of the
//! pipeline.

mod scheduler;

pub use scheduler::{ScheduledVital, SchedulerConfig, VitalsScheduler};
