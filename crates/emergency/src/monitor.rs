//! Emergency Monitor Implementation
//!
//! Evaluated once per incoming kick-count frame. Holds exactly one piece of
//! state, the timestamp of the last triggered alert; it is overwritten on
//! every fire and reset only by process restart.

use crate::config::MonitoringConfig;
use crate::contact::EmergencyContact;
use std::fmt;
use tokio::time::{Duration, Instant};
use tracing::{debug, warn};

/// Minimum elapsed time between two consecutive alerts
pub const ALERT_COOLDOWN: Duration = Duration::from_secs(5 * 60);

/// Which side of the safe band the reading fell on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertDirection {
    Low,
    High,
}

impl fmt::Display for AlertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertDirection::Low => write!(f, "LOW"),
            AlertDirection::High => write!(f, "HIGH"),
        }
    }
}

/// A triggered alert, carrying everything dispatch needs
#[derive(Debug, Clone)]
pub struct KickAlert {
    /// Side of the band the reading fell on
    pub direction: AlertDirection,
    /// The abnormal reading
    pub kick_count: u32,
    /// Snapshot of the primary contact at trigger time
    pub contact: EmergencyContact,
}

impl KickAlert {
    /// Notification body naming direction, value, and the primary contact
    pub fn body(&self) -> String {
        format!(
            "Kick count is {}: {}. Contact: {}",
            self.direction, self.kick_count, self.contact.name
        )
    }
}

/// Stateful watcher deciding when an abnormal reading becomes an alert
pub struct EmergencyMonitor {
    /// Safe-band configuration
    config: MonitoringConfig,
    /// Last triggered alert; None until the first fire
    last_alert: Option<Instant>,
}

impl EmergencyMonitor {
    /// Create a new monitor
    pub fn new(config: MonitoringConfig) -> Self {
        Self {
            config,
            last_alert: None,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &MonitoringConfig {
        &self.config
    }

    /// Replace the configuration (the last-alert timestamp is kept)
    pub fn set_config(&mut self, config: MonitoringConfig) {
        self.config = config;
    }

    /// Evaluate one kick-count observation
    ///
    /// Returns the alert to dispatch, or None when the reading is safe,
    /// monitoring is disabled, the contact list is empty, or the cooldown
    /// has not expired. The cooldown runs from the last *triggered* alert;
    /// abnormal readings inside the window are dropped without extending it.
    pub fn check(
        &mut self,
        kick_count: u32,
        contacts: &[EmergencyContact],
    ) -> Option<KickAlert> {
        if !self.config.enabled || contacts.is_empty() {
            return None;
        }

        if !self.config.is_abnormal(kick_count) {
            return None;
        }

        let now = Instant::now();
        if let Some(last) = self.last_alert {
            if now.duration_since(last) <= ALERT_COOLDOWN {
                debug!("Alert suppressed: in cooldown period");
                return None;
            }
        }

        // Record the fire before any side effect runs, so a slow dispatch
        // cannot re-trigger
        self.last_alert = Some(now);

        let direction = if kick_count < self.config.kick_count_min {
            AlertDirection::Low
        } else {
            AlertDirection::High
        };

        warn!(
            "Abnormal kick count {} ({}), alerting {}",
            kick_count, direction, contacts[0].name
        );

        Some(KickAlert {
            direction,
            kick_count,
            contact: contacts[0].clone(),
        })
    }

    /// Time of the last triggered alert, if any
    pub fn last_alert(&self) -> Option<Instant> {
        self.last_alert
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactType;
    use tokio::time::advance;

    fn dr_lee() -> Vec<EmergencyContact> {
        vec![EmergencyContact::new(
            "Dr. Lee",
            "+15551234567",
            ContactType::Doctor,
        )]
    }

    #[tokio::test(start_paused = true)]
    async fn test_safe_band_is_inclusive() {
        let mut monitor = EmergencyMonitor::new(MonitoringConfig::default());
        let contacts = dr_lee();

        for kicks in [10, 11, 30, 49, 50] {
            assert!(monitor.check(kicks, &contacts).is_none());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_low_and_high_classification() {
        let mut monitor = EmergencyMonitor::new(MonitoringConfig::default());
        let contacts = dr_lee();

        let low = monitor.check(5, &contacts).unwrap();
        assert_eq!(low.direction, AlertDirection::Low);
        assert_eq!(low.kick_count, 5);

        advance(Duration::from_secs(301)).await;

        let high = monitor.check(51, &contacts).unwrap();
        assert_eq!(high.direction, AlertDirection::High);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_never_fires() {
        let config = MonitoringConfig {
            enabled: false,
            ..Default::default()
        };
        let mut monitor = EmergencyMonitor::new(config);
        let contacts = dr_lee();

        assert!(monitor.check(0, &contacts).is_none());
        assert!(monitor.check(999, &contacts).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_contacts_never_fires() {
        let mut monitor = EmergencyMonitor::new(MonitoringConfig::default());
        assert!(monitor.check(0, &[]).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_suppresses_back_to_back_alerts() {
        let mut monitor = EmergencyMonitor::new(MonitoringConfig::default());
        let contacts = dr_lee();

        assert!(monitor.check(5, &contacts).is_some());
        let first_fire = monitor.last_alert().unwrap();

        // One minute later: still inside the cooldown
        advance(Duration::from_secs(60)).await;
        assert!(monitor.check(5, &contacts).is_none());

        // Suppressed observations must not extend the window
        assert_eq!(monitor.last_alert(), Some(first_fire));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_alert_after_cooldown_expires() {
        let mut monitor = EmergencyMonitor::new(MonitoringConfig::default());
        let contacts = dr_lee();

        assert!(monitor.check(5, &contacts).is_some());
        advance(Duration::from_secs(6 * 60)).await;
        assert!(monitor.check(5, &contacts).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reading_sequence_scenario() {
        // Sequence [12, 5, 5] at t=0s, t=1s, t=61s fires exactly once, at
        // t=1s, classified LOW, naming the reading and Dr. Lee
        let mut monitor = EmergencyMonitor::new(MonitoringConfig::default());
        let contacts = dr_lee();

        assert!(monitor.check(12, &contacts).is_none());

        advance(Duration::from_secs(1)).await;
        let alert = monitor.check(5, &contacts).unwrap();
        assert_eq!(alert.direction, AlertDirection::Low);
        assert!(alert.body().contains(": 5."));
        assert!(alert.body().contains("Dr. Lee"));

        advance(Duration::from_secs(60)).await;
        assert!(monitor.check(5, &contacts).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_primary_contact_is_targeted() {
        let mut monitor = EmergencyMonitor::new(MonitoringConfig::default());
        let mut contacts = dr_lee();
        contacts.push(EmergencyContact::new(
            "Alex",
            "+15559876543",
            ContactType::Emergency,
        ));

        let alert = monitor.check(5, &contacts).unwrap();
        assert_eq!(alert.contact.name, "Dr. Lee");
    }
}
