//! Emergency Contact Records

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of emergency contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    /// Treating physician, sorted first
    Doctor,
    /// Personal emergency contact
    Emergency,
}

/// A single emergency contact
///
/// Contacts form an ordered list; the first entry is the "primary" contact,
/// the sole target of the alert notification and call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub contact_type: ContactType,
}

impl EmergencyContact {
    /// Create a contact with a fresh id
    pub fn new(name: impl Into<String>, phone: impl Into<String>, contact_type: ContactType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            contact_type,
        }
    }
}
