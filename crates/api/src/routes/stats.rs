//! Statistics and Pregnancy Routes

use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::AppState;
use storage::PregnancyInfo;
use vitals_stats::{summarize_daily, weekly_rollup, DailyVitals, Gestation, WeeklySummary};

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Response for the weekly stats endpoint
#[derive(Debug, Serialize)]
pub struct WeeklyStatsResponse {
    pub summary: WeeklySummary,
    pub daily: Vec<DailyVitals>,
}

/// Daily totals and rollup over the trailing 7 days
pub async fn weekly_stats(
    State(state): State<Arc<RwLock<AppState>>>,
) -> Result<Json<WeeklyStatsResponse>, StatusCode> {
    let state = state.read().await;

    let since = Utc::now().timestamp_millis() - WEEK_MS;
    let readings = state
        .repository
        .get_readings_since(since)
        .map_err(|e| super::storage_status(&e))?;

    let daily = summarize_daily(&readings);
    let summary = weekly_rollup(&daily);

    Ok(Json(WeeklyStatsResponse { summary, daily }))
}

/// Request body for pregnancy setup
#[derive(Debug, Deserialize)]
pub struct SetupRequest {
    pub start_date: NaiveDate,
}

/// Response for the pregnancy endpoint
#[derive(Debug, Serialize)]
pub struct PregnancyResponse {
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub current_week: i64,
    pub weeks_remaining: i64,
    pub progress_percent: f64,
}

fn pregnancy_response(info: PregnancyInfo) -> PregnancyResponse {
    let gestation = Gestation::from_start(info.start_date);
    let today = Utc::now().date_naive();

    PregnancyResponse {
        start_date: info.start_date,
        due_date: info.due_date,
        current_week: gestation.current_week(today),
        weeks_remaining: gestation.weeks_remaining(today),
        progress_percent: gestation.progress_percent(today),
    }
}

/// Pregnancy timeline with progress derived from today's date
pub async fn get_pregnancy(
    State(state): State<Arc<RwLock<AppState>>>,
) -> Result<Json<PregnancyResponse>, StatusCode> {
    let state = state.read().await;
    let info = state
        .repository
        .get_pregnancy()
        .map_err(|e| super::storage_status(&e))?;

    Ok(Json(pregnancy_response(info)))
}

/// Store the pregnancy start date and derive the due date
pub async fn setup_pregnancy(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(request): Json<SetupRequest>,
) -> Result<(StatusCode, Json<PregnancyResponse>), StatusCode> {
    let gestation = Gestation::from_start(request.start_date);
    let info = PregnancyInfo {
        start_date: gestation.start_date,
        due_date: gestation.due_date,
    };

    info!(
        "Pregnancy setup: start {}, due {}",
        info.start_date, info.due_date
    );

    let state = state.read().await;
    state
        .repository
        .set_pregnancy(info)
        .map_err(|e| super::storage_status(&e))?;

    Ok((StatusCode::CREATED, Json(pregnancy_response(info))))
}
