//! FetalTracker Wearable Link
//!
//! This crate provides async access to the FetalTracker pregnancy wearable
//! over Bluetooth LE. It covers device discovery, connection management,
//! and characteristic reads for the three vitals the device exposes.

mod characteristic;
mod client;
mod error;
mod reading;

pub use characteristic::{Characteristic, CharacteristicResponse};
pub use client::{DiscoveredDevice, WearableClient};
pub use error::DeviceError;
pub use reading::DeviceReading;

/// GATT identifiers used by the wearable
pub mod gatt {
    /// Vitals service UUID (battery-service style layout)
    pub const VITALS_SERVICE: &str = "0000180f-0000-1000-8000-00805f9b34fb";
    /// Advertised name prefix matched during discovery
    pub const DEVICE_NAME_PREFIX: &str = "FetalTracker";
    /// Scan window before discovery gives up (seconds)
    pub const SCAN_WINDOW_SECS: u64 = 10;
}
