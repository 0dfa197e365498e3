//! In-App Transient Message Bus
//!
//! The pipeline has no UI; toasts go onto a broadcast channel any frontend
//! (or test) can subscribe to, and surface in the log either way.

use emergency::TransientMessages;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// A transient message
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub description: String,
    /// How long the message should stay visible
    pub duration: Duration,
}

/// Broadcast bus for transient messages
#[derive(Clone)]
pub struct ToastBus {
    tx: broadcast::Sender<Toast>,
}

impl ToastBus {
    /// Create a bus with room for `capacity` undelivered messages
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to future messages
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }
}

impl Default for ToastBus {
    fn default() -> Self {
        Self::new(16)
    }
}

impl TransientMessages for ToastBus {
    fn show(&self, message: &str, description: &str, duration: Duration) {
        warn!("Toast: {} ({})", message, description);

        let toast = Toast {
            message: message.to_string(),
            description: description.to_string(),
            duration,
        };

        // No subscribers is fine; the log line above already happened
        if self.tx.send(toast).is_err() {
            debug!("Toast shown with no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_toast() {
        let bus = ToastBus::default();
        let mut rx = bus.subscribe();

        bus.show(
            "Abnormal kick count detected: 5",
            "Calling Dr. Lee...",
            Duration::from_secs(10),
        );

        let toast = rx.recv().await.unwrap();
        assert_eq!(toast.message, "Abnormal kick count detected: 5");
        assert_eq!(toast.duration, Duration::from_secs(10));
    }

    #[test]
    fn test_show_without_subscribers_does_not_panic() {
        let bus = ToastBus::default();
        bus.show("message", "description", Duration::from_secs(1));
    }
}
