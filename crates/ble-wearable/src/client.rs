//! Wearable BLE Client
//!
//! Manages discovery of and connection to the FetalTracker wearable. The
//! real GATT transport lives in the platform's Bluetooth stack; this client
//! ships a mock mode that produces deterministic readings in the ranges the
//! firmware advertises, so the rest of the pipeline runs without hardware.

use crate::characteristic::{Characteristic, CharacteristicResponse};
use crate::error::DeviceError;
use crate::gatt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default timeout for GATT operations
const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// A device seen during discovery
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    /// Platform device identifier
    pub id: String,
    /// Advertised name
    pub name: String,
}

/// BLE client for the FetalTracker wearable
pub struct WearableClient {
    /// Connected device identifier, if any
    device_id: Option<String>,
    /// Advertised name of the connected device
    device_name: Option<String>,
    /// GATT operation timeout
    timeout: Duration,
    /// Whether a connection is active
    connected: bool,
    /// Mock mode for testing (simulated vitals, no radio)
    mock_mode: bool,
}

impl WearableClient {
    /// Create a new client backed by the platform Bluetooth stack
    pub fn new() -> Self {
        info!("Creating wearable BLE client");
        Self {
            device_id: None,
            device_name: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            connected: false,
            mock_mode: false,
        }
    }

    /// Create a mock client for testing (no hardware required)
    pub fn mock() -> Self {
        info!("Creating mock wearable client");
        Self {
            device_id: None,
            device_name: None,
            timeout: Duration::from_millis(100),
            connected: false,
            mock_mode: true,
        }
    }

    /// Scan for wearables advertising the FetalTracker name prefix
    ///
    /// Discovery runs for up to [`gatt::SCAN_WINDOW_SECS`] and keeps only
    /// devices whose advertised name matches the prefix.
    pub async fn scan(&mut self) -> Result<Vec<DiscoveredDevice>, DeviceError> {
        info!(
            "Scanning for '{}' devices ({}s window)",
            gatt::DEVICE_NAME_PREFIX,
            gatt::SCAN_WINDOW_SECS
        );

        if self.mock_mode {
            return Ok(vec![DiscoveredDevice {
                id: "mock-0001".to_string(),
                name: format!("{}-A1B2", gatt::DEVICE_NAME_PREFIX),
            }]);
        }

        // In real implementation, we would:
        // 1. Initialize the BLE central role
        // 2. Start an LE scan filtered on the vitals service
        // 3. Collect advertisements whose name matches the prefix
        // 4. Stop the scan after the window elapses

        Err(DeviceError::ScanFailed(
            "platform Bluetooth stack not available".to_string(),
        ))
    }

    /// Connect to a discovered device
    pub async fn connect(&mut self, device: &DiscoveredDevice) -> Result<(), DeviceError> {
        if self.mock_mode {
            debug!("Mock mode: connecting to {}", device.name);
            self.device_id = Some(device.id.clone());
            self.device_name = Some(device.name.clone());
            self.connected = true;
            return Ok(());
        }

        info!("Connecting to {} ({})", device.name, device.id);

        // In real implementation, we would open the GATT connection and
        // register a disconnect callback that clears our state.

        Err(DeviceError::ConnectionFailed(device.id.clone()))
    }

    /// Read a single characteristic from the connected wearable
    pub async fn read_characteristic(
        &mut self,
        characteristic: Characteristic,
    ) -> Result<CharacteristicResponse, DeviceError> {
        if !self.connected {
            return Err(DeviceError::NotConnected);
        }

        let timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        if self.mock_mode {
            return Ok(self.generate_mock_response(characteristic, timestamp_ms));
        }

        debug!("Reading characteristic {}", characteristic.uuid());

        // In real implementation, we would:
        // 1. Issue a GATT read on the characteristic UUID
        // 2. Await the payload up to self.timeout
        // 3. Decode using CharacteristicResponse::decode()

        Err(DeviceError::CharacteristicRead(
            characteristic.name(),
            "platform Bluetooth stack not available".to_string(),
        ))
    }

    /// Set the GATT operation timeout
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Check if a device is connected
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Advertised name of the connected device, if any
    pub fn device_name(&self) -> Option<&str> {
        self.device_name.as_deref()
    }

    /// Disconnect from the wearable
    pub async fn disconnect(&mut self) {
        if self.connected {
            info!("Disconnecting from wearable");
            self.connected = false;
            self.device_id = None;
            self.device_name = None;
        } else {
            warn!("Disconnect requested with no active connection");
        }
    }

    /// Generate a mock payload in the ranges the firmware advertises
    fn generate_mock_response(
        &self,
        characteristic: Characteristic,
        timestamp_ms: u64,
    ) -> CharacteristicResponse {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        // Timestamp-seeded hash gives pseudo-random but deterministic values
        let mut hasher = DefaultHasher::new();
        timestamp_ms.hash(&mut hasher);
        characteristic.uuid().hash(&mut hasher);
        let hash = hasher.finish();

        let raw_bytes = match characteristic {
            // Temperature: 36.00-37.99°C, hundredths over two bytes
            Characteristic::Temperature => {
                let centi = 3600 + (hash % 200) as u16;
                vec![(centi >> 8) as u8, (centi & 0xFF) as u8]
            }
            // Kick count: 0-9 per session
            Characteristic::KickCount => vec![(hash % 10) as u8],
            // Heartbeat: 120-139 bpm
            Characteristic::Heartbeat => vec![(120 + hash % 20) as u8],
        };

        CharacteristicResponse::decode(characteristic, raw_bytes, timestamp_ms)
    }
}

impl Default for WearableClient {
    fn default() -> Self {
        Self::new()
    }
}
