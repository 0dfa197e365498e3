//! Vitals Scheduler Implementation

use ble_wearable::{Characteristic, DeviceError, DeviceReading, WearableClient};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tracing::{info, warn};

/// Configuration for the vitals scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Base polling rate in Hz (default: 0.2, one read every 5 seconds)
    pub base_rate_hz: f64,
    /// Maximum consecutive failures before marking the link unhealthy
    pub max_retries: u8,
    /// Kick-count band outside which polling is boosted
    pub kick_boost_band: (u32, u32),
    /// Boosted rate multiplier
    pub boost_multiplier: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_rate_hz: 0.2,
            max_retries: 3,
            kick_boost_band: (10, 50),
            boost_multiplier: 2.0,
        }
    }
}

/// A scheduled characteristic with rate and timing info
#[derive(Debug, Clone)]
pub struct ScheduledVital {
    /// The characteristic to poll
    pub characteristic: Characteristic,
    /// Current polling rate in Hz
    pub rate_hz: f64,
    /// Next scheduled poll time
    pub next_poll: Instant,
    /// Priority (higher = more important)
    pub priority: u8,
    /// Consecutive failure count
    pub failures: u8,
}

impl ScheduledVital {
    /// Create a new scheduled vital
    pub fn new(characteristic: Characteristic, rate_hz: f64) -> Self {
        Self {
            characteristic,
            rate_hz,
            next_poll: Instant::now(),
            priority: characteristic.sampling_priority(),
            failures: 0,
        }
    }

    /// Interval between polls
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate_hz)
    }

    /// Schedule the next poll
    pub fn schedule_next(&mut self) {
        self.next_poll = Instant::now() + self.interval();
    }
}

impl Eq for ScheduledVital {}

impl PartialEq for ScheduledVital {
    fn eq(&self, other: &Self) -> bool {
        self.next_poll == other.next_poll && self.priority == other.priority
    }
}

impl Ord for ScheduledVital {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (earliest time first),
        // then by priority (higher priority first)
        other
            .next_poll
            .cmp(&self.next_poll)
            .then_with(|| self.priority.cmp(&other.priority))
    }
}

impl PartialOrd for ScheduledVital {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Scheduler polling the wearable's vitals characteristics
pub struct VitalsScheduler {
    /// Scheduled characteristics in priority queue
    queue: BinaryHeap<ScheduledVital>,
    /// Configuration
    config: SchedulerConfig,
    /// Whether the scheduler is running
    running: bool,
    /// Last observed kick count
    last_kick_count: u32,
}

impl VitalsScheduler {
    /// Create a new scheduler with the default characteristic set
    pub fn new(config: SchedulerConfig) -> Self {
        let mut queue = BinaryHeap::new();

        // Kick count and heartbeat at the base rate (every 5s)
        queue.push(ScheduledVital::new(
            Characteristic::KickCount,
            config.base_rate_hz,
        ));
        queue.push(ScheduledVital::new(
            Characteristic::Heartbeat,
            config.base_rate_hz,
        ));

        // Temperature moves slowly, poll at half rate
        queue.push(ScheduledVital::new(
            Characteristic::Temperature,
            config.base_rate_hz / 2.0,
        ));

        info!("Vitals scheduler created with {} characteristics", queue.len());

        Self {
            queue,
            config,
            running: false,
            last_kick_count: 0,
        }
    }

    /// Run the polling loop, sending assembled frames on `frame_tx`
    pub async fn run(
        &mut self,
        client: &mut WearableClient,
        frame_tx: mpsc::Sender<DeviceReading>,
    ) -> Result<(), DeviceError> {
        info!("Starting vitals scheduler");
        self.running = true;

        let mut current_frame = DeviceReading::default();

        while self.running {
            let Some(mut scheduled) = self.queue.pop() else {
                break;
            };

            // Wait until it's time
            let now = Instant::now();
            if scheduled.next_poll > now {
                tokio::time::sleep(scheduled.next_poll - now).await;
            }

            match client.read_characteristic(scheduled.characteristic).await {
                Ok(response) => {
                    scheduled.failures = 0;
                    current_frame.update_from_response(&response);

                    // Boost the kick-count rate while the value sits outside
                    // the safe band
                    if scheduled.characteristic == Characteristic::KickCount {
                        self.last_kick_count = response.value as u32;
                        let (low, high) = self.config.kick_boost_band;
                        if self.last_kick_count < low || self.last_kick_count > high {
                            warn!(
                                "Kick count {} outside band, boosting poll rate",
                                self.last_kick_count
                            );
                            scheduled.rate_hz =
                                self.config.base_rate_hz * self.config.boost_multiplier;
                        } else {
                            scheduled.rate_hz = self.config.base_rate_hz;
                        }
                    }

                    // Send frame (non-blocking)
                    let _ = frame_tx.try_send(current_frame.clone());
                }
                Err(e) => {
                    scheduled.failures += 1;
                    warn!(
                        "Read of {} failed (attempt {}): {}",
                        scheduled.characteristic.name(),
                        scheduled.failures,
                        e
                    );

                    if scheduled.failures >= self.config.max_retries {
                        warn!(
                            "Max retries reached for {}",
                            scheduled.characteristic.name()
                        );
                    }
                }
            }

            scheduled.schedule_next();
            self.queue.push(scheduled);
        }

        info!("Vitals scheduler stopped");
        Ok(())
    }

    /// Stop the scheduler
    pub fn stop(&mut self) {
        info!("Stopping vitals scheduler");
        self.running = false;
    }

    /// Check if the scheduler is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of scheduled characteristics
    pub fn vital_count(&self) -> usize {
        self.queue.len()
    }

    /// Last kick count observed by the polling loop
    pub fn last_kick_count(&self) -> u32 {
        self.last_kick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_creation() {
        let scheduler = VitalsScheduler::new(SchedulerConfig::default());
        assert_eq!(scheduler.vital_count(), 3);
    }

    #[test]
    fn test_scheduled_vital_ordering() {
        let mut kicks = ScheduledVital::new(Characteristic::KickCount, 0.2);
        let mut temp = ScheduledVital::new(Characteristic::Temperature, 0.1);

        // Equal poll time, kick count wins on priority
        let now = Instant::now();
        kicks.next_poll = now;
        temp.next_poll = now;

        assert!(kicks > temp);
    }

    #[test]
    fn test_interval_from_rate() {
        let vital = ScheduledVital::new(Characteristic::KickCount, 0.2);
        assert_eq!(vital.interval(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_emits_frames_from_mock_device() {
        let mut client = WearableClient::mock();
        let devices = client.scan().await.unwrap();
        client.connect(&devices[0]).await.unwrap();

        let (tx, mut rx) = mpsc::channel(16);
        let mut scheduler = VitalsScheduler::new(SchedulerConfig::default());

        // Run enough of the loop to cover each characteristic once
        tokio::select! {
            _ = scheduler.run(&mut client, tx) => {}
            _ = tokio::time::sleep(Duration::from_secs(12)) => {}
        }

        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            frames.push(frame);
        }
        assert!(!frames.is_empty());
        let last = frames.last().unwrap();
        assert!(last.heartbeat >= 120 && last.heartbeat <= 139);
    }
}
