//! Alert Side-Effect Dispatch
//!
//! A triggered alert fans out to three collaborators: a local notification,
//! an in-app transient message, and a telephony handoff. The three are
//! independent failure domains: a denied permission or a failed schedule
//! is logged and swallowed, and never blocks the toast or the call.

use crate::monitor::KickAlert;
use crate::EmergencyError;
use std::time::Duration;
use tracing::{debug, error};

/// Delay before a scheduled notification fires
pub const NOTIFICATION_DELAY: Duration = Duration::from_secs(1);

/// How long the in-app transient message stays visible
pub const TOAST_DURATION: Duration = Duration::from_secs(10);

/// Outcome of a notification permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// A local notification handed to the platform
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    /// Delay from now until the notification fires
    pub delay: Duration,
}

/// Platform local-notification service
pub trait Notifier: Send + Sync {
    /// Ask the platform for permission to show notifications
    fn request_permission(&self) -> PermissionStatus;

    /// Schedule a notification; implementations deliver asynchronously
    fn schedule(&self, request: NotificationRequest) -> Result<(), EmergencyError>;
}

/// In-app transient message surface (toast)
pub trait TransientMessages: Send + Sync {
    fn show(&self, message: &str, description: &str, duration: Duration);
}

/// Platform mechanism to initiate an outbound call
pub trait TelephonyHandoff: Send + Sync {
    /// Fire-and-forget; no call state comes back
    fn dial(&self, phone: &str) -> Result<(), EmergencyError>;
}

/// Fans a triggered alert out to the platform collaborators
pub struct AlertDispatcher<N, M, T> {
    notifier: N,
    messages: M,
    telephony: T,
}

impl<N: Notifier, M: TransientMessages, T: TelephonyHandoff> AlertDispatcher<N, M, T> {
    /// Create a dispatcher over the given collaborators
    pub fn new(notifier: N, messages: M, telephony: T) -> Self {
        Self {
            notifier,
            messages,
            telephony,
        }
    }

    /// Perform all alert side effects
    ///
    /// Returns once every collaborator has been invoked; none of them is
    /// awaited for completion.
    pub fn dispatch(&self, alert: &KickAlert) {
        // Local notification
        match self.notifier.request_permission() {
            PermissionStatus::Granted => {
                let request = NotificationRequest {
                    title: "⚠️ Emergency Alert".to_string(),
                    body: alert.body(),
                    delay: NOTIFICATION_DELAY,
                };
                if let Err(e) = self.notifier.schedule(request) {
                    error!("Notification error: {}", e);
                }
            }
            PermissionStatus::Denied => {
                debug!("Notification permission denied, skipping schedule");
            }
        }

        // In-app transient message
        self.messages.show(
            &format!("Abnormal kick count detected: {}", alert.kick_count),
            &format!("Calling {}...", alert.contact.name),
            TOAST_DURATION,
        );

        // Outbound call to the primary contact
        if alert.contact.phone.is_empty() {
            debug!("Primary contact has no phone number, skipping call");
        } else if let Err(e) = self.telephony.dial(&alert.contact.phone) {
            error!("Call handoff error: {}", e);
        }
    }
}
