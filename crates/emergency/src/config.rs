//! Monitoring Configuration

use serde::{Deserialize, Serialize};

/// Safe-band configuration for kick-count monitoring
///
/// The band is inclusive on both ends: a reading equal to either bound is
/// still safe. Only readings strictly outside the band are abnormal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Lower bound of the safe band (default: 10)
    pub kick_count_min: u32,
    /// Upper bound of the safe band (default: 50)
    pub kick_count_max: u32,
    /// Whether monitoring is active
    pub enabled: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            kick_count_min: 10,
            kick_count_max: 50,
            enabled: true,
        }
    }
}

impl MonitoringConfig {
    /// Is this reading strictly outside the safe band?
    pub fn is_abnormal(&self, kick_count: u32) -> bool {
        kick_count < self.kick_count_min || kick_count > self.kick_count_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_safe() {
        let config = MonitoringConfig::default();
        assert!(!config.is_abnormal(10));
        assert!(!config.is_abnormal(50));
        assert!(!config.is_abnormal(30));
    }

    #[test]
    fn test_strictly_outside_is_abnormal() {
        let config = MonitoringConfig::default();
        assert!(config.is_abnormal(9));
        assert!(config.is_abnormal(51));
        assert!(config.is_abnormal(0));
    }
}
