//! Session endpoint handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bookwell_common::db::models::{Session, SessionState};
use bookwell_common::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::server::AppContext;
use crate::scheduling::{
    AvailabilityRequest, AvailabilityResult, CandidateWindow, ConflictReport,
    CreateSessionRequest, UpdateSessionRequest,
};
use crate::store::sessions::SessionFilter;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<Session>,
}

#[derive(Debug, Deserialize)]
pub struct BulkCreateSessionsRequest {
    pub sessions: Vec<CreateSessionRequest>,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteSessionsRequest {
    pub sessions: Vec<Uuid>,
}

/// Passthrough list filters, comma-separated as in
/// `?professional_ids=a,b&states=SCHEDULED`.
#[derive(Debug, Default, Deserialize)]
pub struct ListSessionsQuery {
    pub professional_ids: Option<String>,
    pub local_ids: Option<String>,
    pub states: Option<String>,
}

fn parse_uuid_list(raw: &Option<String>, what: &str) -> Result<Vec<Uuid>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            Uuid::parse_str(part)
                .map_err(|_| Error::Validation(format!("Invalid {what} id: {part}")))
        })
        .collect()
}

fn parse_state_list(raw: &Option<String>) -> Result<Vec<SessionState>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse())
        .collect()
}

impl ListSessionsQuery {
    fn into_filter(self) -> Result<SessionFilter> {
        Ok(SessionFilter {
            professional_ids: parse_uuid_list(&self.professional_ids, "professional")?,
            local_ids: parse_uuid_list(&self.local_ids, "local")?,
            states: parse_state_list(&self.states)?,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions - Create a single conflict-checked session
pub async fn create_session(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateSessionRequest>,
) -> std::result::Result<(StatusCode, Json<Session>), ApiError> {
    let session = ctx.sessions.create(&req).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /sessions - Fetch sessions, filtered by query params
pub async fn list_sessions(
    State(ctx): State<AppContext>,
    Query(query): Query<ListSessionsQuery>,
) -> std::result::Result<Json<SessionsResponse>, ApiError> {
    let filter = query.into_filter()?;
    let sessions = ctx.sessions.list(&filter).await?;
    Ok(Json(SessionsResponse { sessions }))
}

/// GET /sessions/:session_id
pub async fn get_session(
    State(ctx): State<AppContext>,
    Path(session_id): Path<Uuid>,
) -> std::result::Result<Json<Session>, ApiError> {
    let session = ctx.sessions.get(session_id).await?;
    Ok(Json(session))
}

/// PATCH /sessions/:session_id - Partial update with conflict re-validation
pub async fn update_session(
    State(ctx): State<AppContext>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<UpdateSessionRequest>,
) -> std::result::Result<Json<Session>, ApiError> {
    let session = ctx.sessions.update(session_id, &req).await?;
    Ok(Json(session))
}

/// DELETE /sessions/:session_id
pub async fn delete_session(
    State(ctx): State<AppContext>,
    Path(session_id): Path<Uuid>,
) -> std::result::Result<StatusCode, ApiError> {
    ctx.sessions.delete(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /sessions/bulk - All-or-nothing batch creation
pub async fn bulk_create_sessions(
    State(ctx): State<AppContext>,
    Json(req): Json<BulkCreateSessionsRequest>,
) -> std::result::Result<(StatusCode, Json<SessionsResponse>), ApiError> {
    let sessions = ctx.sessions.bulk_create(&req.sessions).await?;
    Ok((StatusCode::CREATED, Json(SessionsResponse { sessions })))
}

/// DELETE /sessions/bulk - All-or-nothing batch deletion
pub async fn bulk_delete_sessions(
    State(ctx): State<AppContext>,
    Json(req): Json<BulkDeleteSessionsRequest>,
) -> std::result::Result<StatusCode, ApiError> {
    ctx.sessions.bulk_delete(&req.sessions).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /sessions/check-conflicts - Read-only conflict probe
pub async fn check_conflicts(
    State(ctx): State<AppContext>,
    Json(window): Json<CandidateWindow>,
) -> std::result::Result<Json<ConflictReport>, ApiError> {
    let report = ctx.sessions.check_conflicts(&window).await?;
    Ok(Json(report))
}

/// POST /sessions/availability - Busy slots for a date
pub async fn day_availability(
    State(ctx): State<AppContext>,
    Json(req): Json<AvailabilityRequest>,
) -> std::result::Result<Json<AvailabilityResult>, ApiError> {
    let result = ctx.sessions.day_availability(&req).await?;
    Ok(Json(result))
}
