//! Device Reading Frame

use crate::characteristic::{Characteristic, CharacteristicResponse};
use serde::{Deserialize, Serialize};

/// A complete vitals frame assembled from characteristic reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceReading {
    /// Timestamp of the most recent read folded into this frame (Unix ms)
    pub timestamp_ms: u64,
    /// Maternal skin temperature (°C)
    pub temperature: f64,
    /// Fetal kick count for the current session
    pub kick_count: u32,
    /// Fetal heartbeat (bpm)
    pub heartbeat: u32,
}

impl DeviceReading {
    /// Fold a characteristic response into this frame
    pub fn update_from_response(&mut self, response: &CharacteristicResponse) {
        match response.characteristic {
            Characteristic::Temperature => self.temperature = response.value,
            Characteristic::KickCount => self.kick_count = response.value as u32,
            Characteristic::Heartbeat => self.heartbeat = response.value as u32,
        }
        self.timestamp_ms = response.timestamp_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_from_response() {
        let mut reading = DeviceReading::default();

        reading.update_from_response(&CharacteristicResponse::decode(
            Characteristic::KickCount,
            vec![5],
            100,
        ));
        reading.update_from_response(&CharacteristicResponse::decode(
            Characteristic::Heartbeat,
            vec![140],
            200,
        ));

        assert_eq!(reading.kick_count, 5);
        assert_eq!(reading.heartbeat, 140);
        assert_eq!(reading.timestamp_ms, 200);
    }
}
