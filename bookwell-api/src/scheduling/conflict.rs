//! Two-axis session conflict detection
//!
//! A candidate window conflicts with an existing session when both share the
//! same date and their time windows overlap half-open: a session ending at T
//! and another starting at T do not conflict. The professional axis is always
//! checked; the venue axis only when the candidate has a venue.

use bookwell_common::db::models::Session;
use bookwell_common::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::store;

/// A proposed time window to check against existing sessions.
///
/// `exclude_id` carries the session's own id when validating an update, so a
/// session never conflicts with itself.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateWindow {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub professional_id: Uuid,
    pub local_id: Option<Uuid>,
    #[serde(default)]
    pub exclude_id: Option<Uuid>,
}

/// Result of a conflict check; `has_conflict` is true iff either axis list
/// is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictReport {
    pub has_conflict: bool,
    pub professional_conflicts: Vec<Session>,
    pub local_conflicts: Vec<Session>,
}

/// Half-open interval overlap on two same-date windows.
pub fn windows_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Check the candidate window against existing sessions on both axes.
///
/// Read-only; cancelled sessions never count as conflicts. Fails fast with a
/// validation error when the window itself is inverted.
pub async fn detect(
    conn: &mut SqliteConnection,
    window: &CandidateWindow,
) -> Result<ConflictReport> {
    if window.start_time >= window.end_time {
        return Err(Error::Validation(
            "start_time must be before end_time".to_string(),
        ));
    }

    let candidates = store::sessions::sessions_by_professional_and_date(
        conn,
        window.professional_id,
        window.date,
        window.exclude_id,
    )
    .await?;
    let professional_conflicts: Vec<Session> = candidates
        .into_iter()
        .filter(|s| windows_overlap(window.start_time, window.end_time, s.start_time, s.end_time))
        .collect();

    let local_conflicts: Vec<Session> = match window.local_id {
        Some(local_id) => {
            let candidates = store::sessions::sessions_by_local_and_date(
                conn,
                local_id,
                window.date,
                window.exclude_id,
            )
            .await?;
            candidates
                .into_iter()
                .filter(|s| {
                    windows_overlap(window.start_time, window.end_time, s.start_time, s.end_time)
                })
                .collect()
        }
        // Virtual session: the venue axis is skipped entirely
        None => Vec::new(),
    };

    Ok(ConflictReport {
        has_conflict: !professional_conflicts.is_empty() || !local_conflicts.is_empty(),
        professional_conflicts,
        local_conflicts,
    })
}
