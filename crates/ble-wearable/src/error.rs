//! Wearable Link Error Types

use thiserror::Error;

/// Errors that can occur while talking to the wearable
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Bluetooth adapter could not be initialized
    #[error("Bluetooth adapter unavailable: {0}")]
    AdapterUnavailable(String),

    /// Device discovery failed or timed out
    #[error("Scan failed: {0}")]
    ScanFailed(String),

    /// Connection attempt failed
    #[error("Connection to {0} failed")]
    ConnectionFailed(String),

    /// Operation requires an active connection
    #[error("No device connected")]
    NotConnected,

    /// Characteristic read failed
    #[error("Read of {0} failed: {1}")]
    CharacteristicRead(&'static str, String),

    /// Timeout waiting for a GATT response
    #[error("Timeout waiting for GATT response after {0}ms")]
    Timeout(u64),

    /// Payload shorter than the characteristic layout requires
    #[error("Invalid payload for {0}: {1} bytes")]
    InvalidPayload(&'static str, usize),
}

impl From<std::io::Error> for DeviceError {
    fn from(err: std::io::Error) -> Self {
        DeviceError::AdapterUnavailable(err.to_string())
    }
}
