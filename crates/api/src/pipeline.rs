//! Pipeline Wiring
//!
//! Connects the wearable client, scheduler, validator, storage, and the
//! emergency monitor into running tasks. Frames flow scheduler → validator
//! → repository → monitor; a triggered alert is recorded and fanned out to
//! the notification, toast, and telephony collaborators.

use crate::ApiSettings;
use ble_wearable::{DeviceError, DeviceReading, WearableClient};
use chrono::Utc;
use data_validator::{MedianFilter, Validator};
use emergency::{AlertDispatcher, EmergencyMonitor, MonitoringConfig};
use metrics::counter;
use notify::{LocalNotifier, TelUriDialer, ToastBus};
use std::sync::Arc;
use storage::{AlertRecord, ReadingRecord, Repository};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use vitals_scheduler::{SchedulerConfig, VitalsScheduler};

/// Frame channel depth; the processor keeps up at one frame per 5s,
/// this only absorbs boosted-rate bursts
const FRAME_CHANNEL_CAPACITY: usize = 64;

/// Handles to the spawned pipeline tasks
pub struct PipelineHandles {
    pub scheduler: JoinHandle<Result<(), DeviceError>>,
    pub processor: JoinHandle<()>,
    /// Toast bus the processor publishes on
    pub toasts: ToastBus,
}

/// Connect to the wearable and spawn the polling and processing tasks
pub async fn start(
    settings: &ApiSettings,
    repository: Arc<Repository>,
) -> Result<PipelineHandles, DeviceError> {
    let mut client = if settings.mock_device {
        WearableClient::mock()
    } else {
        WearableClient::new()
    };

    let devices = client.scan().await?;
    let device = devices
        .first()
        .ok_or_else(|| DeviceError::ScanFailed("no devices discovered".to_string()))?;
    client.connect(device).await?;
    info!("Connected to wearable: {}", device.name);

    let (frame_tx, frame_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);

    let scheduler = tokio::spawn(async move {
        let mut scheduler = VitalsScheduler::new(SchedulerConfig::default());
        scheduler.run(&mut client, frame_tx).await
    });

    let toasts = ToastBus::default();
    // A mock device means a headless run; record tel: URIs instead of
    // launching them
    let dialer = if settings.mock_device {
        TelUriDialer::dry_run()
    } else {
        TelUriDialer::new()
    };
    let monitor_config = MonitoringConfig {
        kick_count_min: settings.kick_count_min,
        kick_count_max: settings.kick_count_max,
        enabled: settings.monitoring_enabled,
    };

    let processor = tokio::spawn(process_frames(
        frame_rx,
        repository,
        monitor_config,
        toasts.clone(),
        dialer,
    ));

    Ok(PipelineHandles {
        scheduler,
        processor,
        toasts,
    })
}

/// Consume frames: validate, despike, store, and run the emergency monitor
async fn process_frames(
    mut frame_rx: mpsc::Receiver<DeviceReading>,
    repository: Arc<Repository>,
    base_config: MonitoringConfig,
    toasts: ToastBus,
    dialer: TelUriDialer,
) {
    let validator = Validator::default();
    let mut heartbeat_filter = MedianFilter::for_heartbeat();
    let mut monitor = EmergencyMonitor::new(base_config.clone());
    let dispatcher = AlertDispatcher::new(LocalNotifier::granted(), toasts, dialer);

    while let Some(frame) = frame_rx.recv().await {
        let result = validator.validate_reading(&frame);
        if !result.valid {
            counter!("pipeline_frames_rejected").increment(1);
            warn!("Dropping implausible frame: {:?}", result.errors);
            continue;
        }

        let heartbeat = heartbeat_filter.filter(frame.heartbeat as f64).round() as u32;

        let record = ReadingRecord {
            timestamp_ms: Utc::now().timestamp_millis(),
            temperature: frame.temperature,
            kick_count: frame.kick_count,
            heartbeat,
        };
        if let Err(e) = repository.insert_reading(record) {
            error!("Failed to store reading: {}", e);
        }
        counter!("pipeline_frames_stored").increment(1);

        // The user toggle is re-read every frame so a settings change takes
        // effect without a restart
        let user = repository.get_settings();
        monitor.set_config(MonitoringConfig {
            enabled: base_config.enabled && user.emergency_monitoring_enabled,
            ..base_config.clone()
        });

        let contacts = match repository.get_contacts() {
            Ok(contacts) => contacts,
            Err(e) => {
                error!("Failed to load contacts: {}", e);
                continue;
            }
        };

        if let Some(alert) = monitor.check(frame.kick_count, &contacts) {
            counter!("pipeline_alerts_fired").increment(1);

            let record = AlertRecord {
                id: 0,
                timestamp_ms: Utc::now().timestamp_millis(),
                direction: alert.direction.to_string(),
                kick_count: alert.kick_count,
                contact_name: alert.contact.name.clone(),
            };
            if let Err(e) = repository.insert_alert(record) {
                error!("Failed to store alert: {}", e);
            }

            dispatcher.dispatch(&alert);
        }
    }

    info!("Frame processor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Duration};

    #[tokio::test(start_paused = true)]
    async fn test_pipeline_stores_mock_readings() {
        let repository = Arc::new(Repository::new());
        let settings = ApiSettings {
            // Disabled so mock kick values (0..9, all LOW) don't dial out
            monitoring_enabled: false,
            ..Default::default()
        };

        let handles = start(&settings, Arc::clone(&repository)).await.unwrap();

        sleep(Duration::from_secs(30)).await;

        assert!(repository.reading_count() > 0);
        assert_eq!(repository.alert_count(), 0);

        handles.scheduler.abort();
        handles.processor.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pipeline_fires_alert_for_abnormal_kicks() {
        use emergency::{ContactType, EmergencyContact};

        let repository = Arc::new(Repository::new());
        repository
            .add_contact(EmergencyContact::new(
                "Dr. Lee",
                "+15551234567",
                ContactType::Doctor,
            ))
            .unwrap();

        // Mock kick counts are 0..9, always below the default band
        let settings = ApiSettings::default();
        let handles = start(&settings, Arc::clone(&repository)).await.unwrap();

        sleep(Duration::from_secs(30)).await;

        assert!(repository.alert_count() >= 1);
        let alerts = repository.get_alerts(10).unwrap();
        assert_eq!(alerts[0].direction, "LOW");
        assert_eq!(alerts[0].contact_name, "Dr. Lee");

        handles.scheduler.abort();
        handles.processor.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_toggle_gates_monitoring() {
        use emergency::{ContactType, EmergencyContact};
        use storage::UserSettings;

        let repository = Arc::new(Repository::new());
        repository
            .add_contact(EmergencyContact::new(
                "Dr. Lee",
                "+15551234567",
                ContactType::Doctor,
            ))
            .unwrap();
        repository
            .update_settings(UserSettings {
                emergency_monitoring_enabled: false,
                ..Default::default()
            })
            .unwrap();

        let settings = ApiSettings::default();
        let handles = start(&settings, Arc::clone(&repository)).await.unwrap();

        sleep(Duration::from_secs(30)).await;
        assert_eq!(repository.alert_count(), 0);

        handles.scheduler.abort();
        handles.processor.abort();
    }
}
