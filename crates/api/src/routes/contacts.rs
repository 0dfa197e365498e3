//! Emergency Contact Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use emergency::{ContactType, EmergencyContact};

/// Request body for adding a contact
#[derive(Debug, Deserialize)]
pub struct AddContactRequest {
    pub name: String,
    pub phone: String,
    pub contact_type: ContactType,
}

/// Response for the contact list endpoint
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub data: Vec<EmergencyContact>,
    pub count: usize,
}

/// List contacts, primary contact first
pub async fn list_contacts(
    State(state): State<Arc<RwLock<AppState>>>,
) -> Result<Json<ContactResponse>, StatusCode> {
    let state = state.read().await;
    let data = state
        .repository
        .get_contacts()
        .map_err(|e| super::storage_status(&e))?;

    Ok(Json(ContactResponse {
        count: data.len(),
        data,
    }))
}

/// Add a contact
pub async fn add_contact(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(request): Json<AddContactRequest>,
) -> Result<(StatusCode, Json<EmergencyContact>), StatusCode> {
    if request.name.trim().is_empty() || request.phone.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let contact = EmergencyContact::new(&request.name, &request.phone, request.contact_type);
    info!("Adding contact: {} ({:?})", contact.name, contact.contact_type);

    let state = state.read().await;
    state
        .repository
        .add_contact(contact.clone())
        .map_err(|e| super::storage_status(&e))?;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// Remove a contact by id
pub async fn remove_contact(
    State(state): State<Arc<RwLock<AppState>>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let state = state.read().await;
    state
        .repository
        .remove_contact(id)
        .map_err(|e| super::storage_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}
