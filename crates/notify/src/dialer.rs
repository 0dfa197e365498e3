//! Telephony Handoff via tel: URI
//!
//! Hands the call off to whatever the OS registers for `tel:` URIs. No call
//! state comes back; once the URI launches, the platform owns the call.

use emergency::{EmergencyError, TelephonyHandoff};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Dialer launching `tel:` URIs through the platform opener
#[derive(Clone)]
pub struct TelUriDialer {
    /// Record URIs instead of launching them (for tests and headless runs)
    dry_run: bool,
    /// URIs handed off so far
    dialed: Arc<Mutex<Vec<String>>>,
}

impl TelUriDialer {
    /// Create a dialer that launches URIs through the OS
    pub fn new() -> Self {
        Self {
            dry_run: false,
            dialed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a dialer that only records the URIs it would launch
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            dialed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URIs handed off so far
    pub fn dialed(&self) -> Vec<String> {
        self.dialed.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl Default for TelUriDialer {
    fn default() -> Self {
        Self::new()
    }
}

impl TelephonyHandoff for TelUriDialer {
    fn dial(&self, phone: &str) -> Result<(), EmergencyError> {
        let uri = format!("tel:{}", phone);
        info!("Initiating call handoff: {}", uri);

        if !self.dry_run {
            open::that(&uri).map_err(|e| EmergencyError::Telephony(e.to_string()))?;
        }

        if let Ok(mut log) = self.dialed.lock() {
            log.push(uri);
        }
        Ok(())
    }
}
