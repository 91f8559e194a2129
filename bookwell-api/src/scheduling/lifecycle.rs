//! Session lifecycle orchestration
//!
//! Every time/resource-affecting mutation runs the conflict detector inside
//! the same write transaction as the eventual persist, so no partial writes
//! are ever visible and the check cannot race the insert.

use bookwell_common::db::models::{Session, SessionState};
use bookwell_common::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use sqlx::SqliteConnection;
use tracing::info;
use uuid::Uuid;

use crate::bulk;
use crate::scheduling::availability::{self, AvailabilityRequest, AvailabilityResult};
use crate::scheduling::conflict::{self, CandidateWindow, ConflictReport};
use crate::store::sessions::SessionFilter;
use crate::store::{self, Store};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i64,
    pub session_link: Option<String>,
    pub professional_id: Uuid,
    pub local_id: Option<Uuid>,
    pub community_service_id: Option<Uuid>,
}

/// Partial update; absent fields keep their current value. The venue cannot
/// be cleared through a partial update, only replaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSessionRequest {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub state: Option<SessionState>,
    pub registered_count: Option<i64>,
    pub capacity: Option<i64>,
    pub session_link: Option<String>,
    pub professional_id: Option<Uuid>,
    pub local_id: Option<Uuid>,
    pub community_service_id: Option<Uuid>,
}

/// Orchestrates session create/update/delete with conflict-safety.
#[derive(Clone)]
pub struct SessionService {
    store: Store,
}

impl SessionService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: &CreateSessionRequest) -> Result<Session> {
        let req = req.clone();
        self.store
            .with_write_tx(move |conn| {
                let req = req.clone();
                Box::pin(async move { create_session_tx(conn, &req).await })
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Session> {
        let mut conn = self.store.acquire().await?;
        store::sessions::get_session(&mut conn, id).await
    }

    pub async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>> {
        let mut conn = self.store.acquire().await?;
        store::sessions::list_sessions(&mut conn, filter).await
    }

    pub async fn update(&self, id: Uuid, req: &UpdateSessionRequest) -> Result<Session> {
        let req = req.clone();
        self.store
            .with_write_tx(move |conn| {
                let req = req.clone();
                Box::pin(async move { update_session_tx(conn, id, &req).await })
            })
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store
            .with_write_tx(|conn| Box::pin(store::sessions::delete_session(conn, id)))
            .await
    }

    /// Create a batch of sessions under one transaction. The empty batch is
    /// rejected; the first failing item aborts and rolls back the whole batch.
    pub async fn bulk_create(&self, reqs: &[CreateSessionRequest]) -> Result<Vec<Session>> {
        bulk::require_items(reqs, "sessions")?;
        let reqs = reqs.to_vec();
        self.store
            .with_write_tx(move |conn| {
                let reqs = reqs.clone();
                Box::pin(async move {
                    bulk::apply_ordered(conn, &reqs, |conn, req| {
                        Box::pin(create_session_tx(conn, req))
                    })
                    .await
                })
            })
            .await
    }

    /// Delete a batch of sessions under one transaction; an unknown id fails
    /// the whole batch. An empty batch is a successful no-op.
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let ids = ids.to_vec();
        self.store
            .with_write_tx(move |conn| {
                let ids = ids.clone();
                Box::pin(async move {
                    for id in ids {
                        store::sessions::delete_session(conn, id).await?;
                    }
                    Ok(())
                })
            })
            .await
    }

    /// Read-only conflict probe; never writes.
    pub async fn check_conflicts(&self, window: &CandidateWindow) -> Result<ConflictReport> {
        let mut conn = self.store.acquire().await?;
        conflict::detect(&mut conn, window).await
    }

    pub async fn day_availability(&self, req: &AvailabilityRequest) -> Result<AvailabilityResult> {
        let mut conn = self.store.acquire().await?;
        availability::day_availability(&mut conn, req).await
    }
}

async fn create_session_tx(
    conn: &mut SqliteConnection,
    req: &CreateSessionRequest,
) -> Result<Session> {
    validate_create(req)?;

    if !store::catalog::professional_exists(conn, req.professional_id).await? {
        return Err(Error::NotFound("Professional not found".to_string()));
    }
    if let Some(local_id) = req.local_id {
        if !store::catalog::local_exists(conn, local_id).await? {
            return Err(Error::NotFound("Local not found".to_string()));
        }
    }

    let report = conflict::detect(
        conn,
        &CandidateWindow {
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
            professional_id: req.professional_id,
            local_id: req.local_id,
            exclude_id: None,
        },
    )
    .await?;
    if report.has_conflict {
        return Err(Error::Conflict("Session time conflict detected".to_string()));
    }

    let session = Session {
        id: Uuid::new_v4(),
        title: req.title.clone(),
        date: req.date,
        start_time: req.start_time,
        end_time: req.end_time,
        state: SessionState::Scheduled,
        registered_count: 0,
        capacity: req.capacity,
        session_link: req.session_link.clone(),
        professional_id: req.professional_id,
        local_id: req.local_id,
        community_service_id: req.community_service_id,
    };
    store::sessions::insert_session(conn, &session).await?;

    info!(session_id = %session.id, date = %session.date, "scheduled session");
    Ok(session)
}

async fn update_session_tx(
    conn: &mut SqliteConnection,
    id: Uuid,
    req: &UpdateSessionRequest,
) -> Result<Session> {
    let existing = store::sessions::get_session(conn, id).await?;

    if let Some(professional_id) = req.professional_id {
        if !store::catalog::professional_exists(conn, professional_id).await? {
            return Err(Error::NotFound("Professional not found".to_string()));
        }
    }
    if let Some(local_id) = req.local_id {
        if !store::catalog::local_exists(conn, local_id).await? {
            return Err(Error::NotFound("Local not found".to_string()));
        }
    }

    let merged = merge_update(&existing, req);
    validate_merged(&merged)?;

    // Conflict re-validation only when the effective window or either
    // resource axis moved; metadata-only updates never re-check.
    let window_changed = merged.date != existing.date
        || merged.start_time != existing.start_time
        || merged.end_time != existing.end_time
        || merged.professional_id != existing.professional_id
        || merged.local_id != existing.local_id;
    if window_changed {
        let report = conflict::detect(
            conn,
            &CandidateWindow {
                date: merged.date,
                start_time: merged.start_time,
                end_time: merged.end_time,
                professional_id: merged.professional_id,
                local_id: merged.local_id,
                exclude_id: Some(id),
            },
        )
        .await?;
        if report.has_conflict {
            return Err(Error::Conflict("Session time conflict detected".to_string()));
        }
    }

    store::sessions::update_session(conn, &merged).await?;
    Ok(merged)
}

/// Merge partial fields onto the loaded row, field by field.
fn merge_update(existing: &Session, req: &UpdateSessionRequest) -> Session {
    Session {
        id: existing.id,
        title: req.title.clone().unwrap_or_else(|| existing.title.clone()),
        date: req.date.unwrap_or(existing.date),
        start_time: req.start_time.unwrap_or(existing.start_time),
        end_time: req.end_time.unwrap_or(existing.end_time),
        state: req.state.unwrap_or(existing.state),
        registered_count: req.registered_count.unwrap_or(existing.registered_count),
        capacity: req.capacity.unwrap_or(existing.capacity),
        session_link: req
            .session_link
            .clone()
            .or_else(|| existing.session_link.clone()),
        professional_id: req.professional_id.unwrap_or(existing.professional_id),
        local_id: req.local_id.or(existing.local_id),
        community_service_id: req
            .community_service_id
            .or(existing.community_service_id),
    }
}

fn validate_create(req: &CreateSessionRequest) -> Result<()> {
    if req.title.trim().is_empty() {
        return Err(Error::Validation("title must not be empty".to_string()));
    }
    if req.start_time >= req.end_time {
        return Err(Error::Validation(
            "start_time must be before end_time".to_string(),
        ));
    }
    if req.capacity <= 0 {
        return Err(Error::Validation("capacity must be positive".to_string()));
    }
    Ok(())
}

fn validate_merged(session: &Session) -> Result<()> {
    if session.title.trim().is_empty() {
        return Err(Error::Validation("title must not be empty".to_string()));
    }
    if session.start_time >= session.end_time {
        return Err(Error::Validation(
            "start_time must be before end_time".to_string(),
        ));
    }
    if session.capacity <= 0 {
        return Err(Error::Validation("capacity must be positive".to_string()));
    }
    if session.registered_count < 0 || session.registered_count > session.capacity {
        return Err(Error::Validation(
            "registered_count must be between 0 and capacity".to_string(),
        ));
    }
    Ok(())
}
