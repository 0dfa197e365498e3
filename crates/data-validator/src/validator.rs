//! Vitals Plausibility Checking
//!
//! A reading outside these ranges is a sensor or transport fault, not a
//! clinical observation, and is dropped before it can trip the emergency
//! monitor.

use crate::error::ValidationError;
use ble_wearable::DeviceReading;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maternal temperature plausible range (°C)
    pub temperature_range: (f64, f64),
    /// Fetal heartbeat plausible range (bpm)
    pub heartbeat_range: (f64, f64),
    /// Session kick count plausible range
    pub kick_count_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            temperature_range: (30.0, 45.0),
            heartbeat_range: (60.0, 220.0),
            kick_count_range: (0.0, 200.0),
        }
    }
}

/// Result of validating one frame
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are plausible
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields checked
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for wearable vitals frames
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with the given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate maternal temperature
    pub fn validate_temperature(&self, temp: f64) -> Result<(), ValidationError> {
        self.validate_range("temperature", temp, self.config.temperature_range)
    }

    /// Validate fetal heartbeat
    pub fn validate_heartbeat(&self, bpm: f64) -> Result<(), ValidationError> {
        self.validate_range("heartbeat", bpm, self.config.heartbeat_range)
    }

    /// Validate session kick count
    pub fn validate_kick_count(&self, kicks: f64) -> Result<(), ValidationError> {
        self.validate_range("kick_count", kicks, self.config.kick_count_range)
    }

    /// Validate a complete frame, collecting every failure
    pub fn validate_reading(&self, reading: &DeviceReading) -> ValidationResult {
        let checks = [
            self.validate_temperature(reading.temperature),
            self.validate_heartbeat(reading.heartbeat as f64),
            self.validate_kick_count(reading.kick_count as f64),
        ];
        let fields_checked = checks.len();

        let errors: Vec<_> = checks.into_iter().filter_map(Result::err).collect();

        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            debug!("Frame rejected with {} validation errors", errors.len());
            ValidationResult::invalid(errors, fields_checked)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
