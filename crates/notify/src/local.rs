//! Local Notification Delivery
//!
//! Schedules are honored by a spawned task that sleeps out the requested
//! delay and then delivers. Delivered notifications stay inspectable, which
//! is all a headless pipeline needs from the platform notification center.

use emergency::{EmergencyError, NotificationRequest, Notifier, PermissionStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// A notification that reached delivery
#[derive(Debug, Clone)]
pub struct DeliveredNotification {
    pub title: String,
    pub body: String,
}

/// Local notification service
#[derive(Clone)]
pub struct LocalNotifier {
    /// Whether the user granted notification permission
    granted: Arc<AtomicBool>,
    /// Notifications that have fired
    delivered: Arc<Mutex<Vec<DeliveredNotification>>>,
}

impl LocalNotifier {
    /// Create a notifier with permission already granted
    pub fn granted() -> Self {
        Self {
            granted: Arc::new(AtomicBool::new(true)),
            delivered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a notifier whose permission request will be denied
    pub fn denied() -> Self {
        Self {
            granted: Arc::new(AtomicBool::new(false)),
            delivered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Update the stored permission state
    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::Relaxed);
    }

    /// Notifications that have fired so far
    pub fn delivered(&self) -> Vec<DeliveredNotification> {
        self.delivered.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl Notifier for LocalNotifier {
    fn request_permission(&self) -> PermissionStatus {
        if self.granted.load(Ordering::Relaxed) {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    fn schedule(&self, request: NotificationRequest) -> Result<(), EmergencyError> {
        let delivered = Arc::clone(&self.delivered);

        // Fire-and-forget: the caller is not kept waiting for delivery
        tokio::spawn(async move {
            tokio::time::sleep(request.delay).await;
            info!("Notification: {}: {}", request.title, request.body);
            match delivered.lock() {
                Ok(mut log) => log.push(DeliveredNotification {
                    title: request.title,
                    body: request.body,
                }),
                Err(e) => warn!("Notification log poisoned: {}", e),
            }
        });

        Ok(())
    }
}
