//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db;
use crate::errors::{IndexerError, Result};
use crate::events::{EventRecord, HackathonRecord};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    /// Stored event type, e.g. `vote_cast`.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HackathonFilter {
    /// `ongoing` or `past`.
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct HackathonEventsResponse {
    pub hackathon: HackathonRecord,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HackathonsResponse {
    pub count: usize,
    pub hackathons: Vec<HackathonRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub last_ledger: i64,
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health(State(state): State<Arc<ApiState>>) -> Result<impl IntoResponse> {
    let last_ledger = db::get_last_ledger(&state.pool).await?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        last_ledger,
    }))
}

/// `GET /events?type=<event_type>`
///
/// Returns all indexed events, optionally of a single type.
pub async fn get_all_events(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<EventFilter>,
) -> Result<impl IntoResponse> {
    let events = db::get_all_events(&state.pool, filter.event_type.as_deref()).await?;
    Ok(Json(AllEventsResponse {
        count: events.len(),
        events,
    }))
}

/// `GET /hackathons?status=ongoing|past`
pub async fn list_hackathons(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<HackathonFilter>,
) -> Result<impl IntoResponse> {
    let status = filter.status.as_deref();
    if let Some(status) = status {
        if status != "ongoing" && status != "past" {
            return Err(IndexerError::BadRequest(format!(
                "status must be `ongoing` or `past`, got `{status}`"
            )));
        }
    }
    let hackathons = db::list_hackathons(&state.pool, status).await?;
    Ok(Json(HackathonsResponse {
        count: hackathons.len(),
        hackathons,
    }))
}

/// `GET /hackathons/:id/events`
///
/// Returns the hackathon and every indexed event concerning it.
pub async fn get_hackathon_events(
    State(state): State<Arc<ApiState>>,
    Path(hackathon_id): Path<String>,
) -> Result<impl IntoResponse> {
    let hackathon = db::get_hackathon(&state.pool, &hackathon_id)
        .await?
        .ok_or_else(|| IndexerError::NotFound(format!("hackathon {hackathon_id}")))?;
    let events = db::get_events_for_hackathon(&state.pool, &hackathon_id).await?;
    Ok(Json(HackathonEventsResponse {
        hackathon,
        count: events.len(),
        events,
    }))
}
