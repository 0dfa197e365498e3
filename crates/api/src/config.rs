//! Runtime Configuration
//!
//! Layered settings: built-in defaults, then an optional `fetaltrack.toml`
//! file, then `FETALTRACK_`-prefixed environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;

/// Server and pipeline settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Address the API server binds to
    pub bind_addr: String,
    /// Run the wearable client in mock mode (no hardware required)
    pub mock_device: bool,
    /// Lower bound of the safe kick-count band
    pub kick_count_min: u32,
    /// Upper bound of the safe kick-count band
    pub kick_count_max: u32,
    /// Master switch for the emergency monitor
    pub monitoring_enabled: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            mock_device: true,
            kick_count_min: 10,
            kick_count_max: 50,
            monitoring_enabled: true,
        }
    }
}

impl ApiSettings {
    /// Load settings from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(File::with_name("fetaltrack").required(false))
            .add_source(Environment::with_prefix("FETALTRACK"))
            .build()?
            .try_deserialize()
    }
}
