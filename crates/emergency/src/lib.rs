//! Emergency Monitoring
//!
//! Watches the streaming kick count against a configured safe band and, on
//! an out-of-band observation, raises a rate-limited alert: a local
//! notification, an in-app transient message, and an outbound call to the
//! primary emergency contact.
//!
//! The monitor itself is a pure decision layer; side effects go through the
//! collaborator traits in [`dispatch`].

mod config;
mod contact;
mod dispatch;
mod monitor;

pub use config::MonitoringConfig;
pub use contact::{ContactType, EmergencyContact};
pub use dispatch::{
    AlertDispatcher, NotificationRequest, Notifier, PermissionStatus, TelephonyHandoff,
    TransientMessages, NOTIFICATION_DELAY, TOAST_DURATION,
};
pub use monitor::{AlertDirection, EmergencyMonitor, KickAlert, ALERT_COOLDOWN};

use thiserror::Error;

/// Errors surfaced by alert side effects
///
/// These never propagate out of dispatch; they are logged and swallowed so
/// one failing channel cannot block the others.
#[derive(Debug, Error)]
pub enum EmergencyError {
    #[error("Notification scheduling failed: {0}")]
    Schedule(String),

    #[error("Telephony handoff failed: {0}")]
    Telephony(String),
}
