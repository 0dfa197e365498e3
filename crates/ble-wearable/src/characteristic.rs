//! Vitals Characteristic Definitions and Payload Decoding
//!
//! Defines the three GATT characteristics the wearable exposes and the
//! presumed payload layout for each. The firmware does not document its
//! wire format, so these formulas cover the layout the mock path produces.

use serde::{Deserialize, Serialize};

/// Characteristics of the wearable's vitals service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Characteristic {
    /// Maternal skin temperature (0x2A19)
    Temperature,
    /// Fetal kick count for the current session (0x2A1A)
    KickCount,
    /// Fetal heartbeat (0x2A1B)
    Heartbeat,
}

impl Characteristic {
    /// Full 128-bit UUID string for this characteristic
    pub fn uuid(&self) -> &'static str {
        match self {
            Characteristic::Temperature => "00002a19-0000-1000-8000-00805f9b34fb",
            Characteristic::KickCount => "00002a1a-0000-1000-8000-00805f9b34fb",
            Characteristic::Heartbeat => "00002a1b-0000-1000-8000-00805f9b34fb",
        }
    }

    /// Short identifier used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Characteristic::Temperature => "temperature",
            Characteristic::KickCount => "kick_count",
            Characteristic::Heartbeat => "heartbeat",
        }
    }

    /// Number of payload bytes this characteristic carries
    pub fn payload_bytes(&self) -> usize {
        match self {
            Characteristic::Temperature => 2,
            Characteristic::KickCount | Characteristic::Heartbeat => 1,
        }
    }

    /// Polling priority (higher = more frequent)
    pub fn sampling_priority(&self) -> u8 {
        match self {
            // Kick count feeds the emergency monitor
            Characteristic::KickCount => 10,
            Characteristic::Heartbeat => 5,
            Characteristic::Temperature => 2,
        }
    }
}

/// Decoded response from a characteristic read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacteristicResponse {
    /// The characteristic that was read
    pub characteristic: Characteristic,
    /// Timestamp when the read completed (Unix ms)
    pub timestamp_ms: u64,
    /// Decoded value
    pub value: f64,
    /// Raw payload bytes
    pub raw_bytes: Vec<u8>,
}

impl CharacteristicResponse {
    /// Create a response by decoding raw payload bytes
    pub fn decode(characteristic: Characteristic, raw_bytes: Vec<u8>, timestamp_ms: u64) -> Self {
        let value = Self::decode_value(characteristic, &raw_bytes);
        Self {
            characteristic,
            timestamp_ms,
            value,
            raw_bytes,
        }
    }

    /// Decode the payload to a value based on the characteristic layout
    fn decode_value(characteristic: Characteristic, bytes: &[u8]) -> f64 {
        match characteristic {
            // Temperature: ((A*256)+B)/100 (°C)
            Characteristic::Temperature if bytes.len() >= 2 => {
                ((bytes[0] as f64 * 256.0) + bytes[1] as f64) / 100.0
            }
            // Kick count: A (kicks this session)
            Characteristic::KickCount if !bytes.is_empty() => bytes[0] as f64,
            // Heartbeat: A (bpm)
            Characteristic::Heartbeat if !bytes.is_empty() => bytes[0] as f64,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_temperature_decode() {
        // 37.25°C = 3725 = 0x0E8D
        let response =
            CharacteristicResponse::decode(Characteristic::Temperature, vec![0x0E, 0x8D], 0);
        assert!((response.value - 37.25).abs() < 0.001);
    }

    #[test]
    fn test_single_byte_decodes() {
        let kicks = CharacteristicResponse::decode(Characteristic::KickCount, vec![7], 0);
        assert_eq!(kicks.value, 7.0);

        let heart = CharacteristicResponse::decode(Characteristic::Heartbeat, vec![132], 0);
        assert_eq!(heart.value, 132.0);
    }

    #[test]
    fn test_short_payload_decodes_to_zero() {
        let response = CharacteristicResponse::decode(Characteristic::Temperature, vec![0x0E], 0);
        assert_eq!(response.value, 0.0);
    }

    proptest! {
        #[test]
        fn prop_kick_count_decode_is_identity(raw in 0u8..=255) {
            let response =
                CharacteristicResponse::decode(Characteristic::KickCount, vec![raw], 0);
            prop_assert_eq!(response.value, raw as f64);
        }

        #[test]
        fn prop_temperature_decode_in_payload_range(a in 0u8..=255, b in 0u8..=255) {
            let response =
                CharacteristicResponse::decode(Characteristic::Temperature, vec![a, b], 0);
            prop_assert!(response.value >= 0.0);
            prop_assert!(response.value <= 655.35);
        }
    }
}
