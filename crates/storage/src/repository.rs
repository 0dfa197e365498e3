//! Repository Implementation

use crate::StorageError;
use chrono::NaiveDate;
use emergency::EmergencyContact;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Stored vitals reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingRecord {
    pub timestamp_ms: i64,
    pub temperature: f64,
    pub kick_count: u32,
    pub heartbeat: u32,
}

/// Stored fired alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: i64,
    pub timestamp_ms: i64,
    /// "LOW" or "HIGH"
    pub direction: String,
    pub kick_count: u32,
    pub contact_name: String,
}

/// Daily journal entry, one per calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub notes: String,
    pub mood: Option<String>,
}

/// Pregnancy start and due dates
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PregnancyInfo {
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// User-facing toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub notifications_enabled: bool,
    pub emergency_monitoring_enabled: bool,
    pub theme: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            emergency_monitoring_enabled: true,
            theme: "light".to_string(),
        }
    }
}

/// Repository for pipeline data (in-memory)
pub struct Repository {
    /// Vitals readings, oldest first
    readings: Mutex<VecDeque<ReadingRecord>>,
    /// Fired alerts
    alerts: Mutex<Vec<AlertRecord>>,
    /// Journal entries keyed by date (upsert per day)
    journal: Mutex<BTreeMap<NaiveDate, JournalEntry>>,
    /// Emergency contacts, ordered by contact type (doctor first)
    contacts: Mutex<Vec<EmergencyContact>>,
    /// Pregnancy info, set once during setup
    pregnancy: Mutex<Option<PregnancyInfo>>,
    /// User settings
    settings: Mutex<UserSettings>,
    /// Max reading records (7 days at one frame per 5s = ~121k; capped lower)
    max_reading_records: usize,
    /// Max alert records
    max_alert_records: usize,
    /// Next alert ID
    next_alert_id: Mutex<i64>,
}

impl Repository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        info!("Creating in-memory repository");
        Self {
            readings: Mutex::new(VecDeque::with_capacity(10_000)),
            alerts: Mutex::new(Vec::with_capacity(100)),
            journal: Mutex::new(BTreeMap::new()),
            contacts: Mutex::new(Vec::new()),
            pregnancy: Mutex::new(None),
            settings: Mutex::new(UserSettings::default()),
            max_reading_records: 100_000,
            max_alert_records: 1_000,
            next_alert_id: Mutex::new(1),
        }
    }

    /// Insert a vitals reading
    pub fn insert_reading(&self, record: ReadingRecord) -> Result<(), StorageError> {
        let mut readings = self
            .readings
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        // Enforce retention
        while readings.len() >= self.max_reading_records {
            readings.pop_front();
        }

        readings.push_back(record);
        Ok(())
    }

    /// Get recent readings, newest first
    pub fn get_readings(&self, limit: usize) -> Result<Vec<ReadingRecord>, StorageError> {
        let readings = self
            .readings
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        Ok(readings.iter().rev().take(limit).cloned().collect())
    }

    /// Get readings at or after a timestamp, oldest first
    pub fn get_readings_since(&self, since_ms: i64) -> Result<Vec<ReadingRecord>, StorageError> {
        let readings = self
            .readings
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        Ok(readings
            .iter()
            .filter(|r| r.timestamp_ms >= since_ms)
            .cloned()
            .collect())
    }

    /// Insert a fired alert, returning its assigned id
    pub fn insert_alert(&self, mut record: AlertRecord) -> Result<i64, StorageError> {
        let mut alerts = self
            .alerts
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        let mut id = self
            .next_alert_id
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        record.id = *id;
        *id += 1;

        if alerts.len() >= self.max_alert_records {
            alerts.remove(0);
        }

        let assigned = record.id;
        alerts.push(record);
        debug!("Inserted alert with ID {}", assigned);

        Ok(assigned)
    }

    /// Get recent alerts, newest first
    pub fn get_alerts(&self, limit: usize) -> Result<Vec<AlertRecord>, StorageError> {
        let alerts = self
            .alerts
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        Ok(alerts.iter().rev().take(limit).cloned().collect())
    }

    /// Insert or replace the journal entry for its date
    pub fn upsert_journal(&self, entry: JournalEntry) -> Result<(), StorageError> {
        let mut journal = self
            .journal
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        journal.insert(entry.date, entry);
        Ok(())
    }

    /// Get the journal entry for a date
    pub fn get_journal(&self, date: NaiveDate) -> Result<JournalEntry, StorageError> {
        let journal = self
            .journal
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        journal.get(&date).cloned().ok_or(StorageError::NotFound)
    }

    /// Get journal entries in an inclusive date range, oldest first
    pub fn get_journal_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<JournalEntry>, StorageError> {
        let journal = self
            .journal
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        Ok(journal.range(from..=to).map(|(_, e)| e.clone()).collect())
    }

    /// Add a contact; the list stays ordered by contact type, doctor first
    pub fn add_contact(&self, contact: EmergencyContact) -> Result<(), StorageError> {
        let mut contacts = self
            .contacts
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        contacts.push(contact);
        contacts.sort_by_key(|c| c.contact_type);
        Ok(())
    }

    /// Ordered contact list; the first entry is the primary contact
    pub fn get_contacts(&self) -> Result<Vec<EmergencyContact>, StorageError> {
        let contacts = self
            .contacts
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        Ok(contacts.clone())
    }

    /// Remove a contact by id
    pub fn remove_contact(&self, id: Uuid) -> Result<(), StorageError> {
        let mut contacts = self
            .contacts
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        if contacts.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    /// Store pregnancy info (setup)
    pub fn set_pregnancy(&self, info: PregnancyInfo) -> Result<(), StorageError> {
        let mut pregnancy = self
            .pregnancy
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        *pregnancy = Some(info);
        Ok(())
    }

    /// Pregnancy info, if setup has run
    pub fn get_pregnancy(&self) -> Result<PregnancyInfo, StorageError> {
        let pregnancy = self
            .pregnancy
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        pregnancy.ok_or(StorageError::NotFound)
    }

    /// Current user settings
    pub fn get_settings(&self) -> UserSettings {
        self.settings
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Replace user settings
    pub fn update_settings(&self, settings: UserSettings) -> Result<(), StorageError> {
        let mut stored = self
            .settings
            .lock()
            .map_err(|e| StorageError::StoreError(format!("Lock error: {}", e)))?;

        *stored = settings;
        Ok(())
    }

    /// Total reading count
    pub fn reading_count(&self) -> usize {
        self.readings.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Total alert count
    pub fn alert_count(&self) -> usize {
        self.alerts.lock().map(|a| a.len()).unwrap_or(0)
    }

    /// Clear all data (for testing)
    pub fn clear(&self) {
        if let Ok(mut readings) = self.readings.lock() {
            readings.clear();
        }
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.clear();
        }
        if let Ok(mut journal) = self.journal.lock() {
            journal.clear();
        }
        if let Ok(mut contacts) = self.contacts.lock() {
            contacts.clear();
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
