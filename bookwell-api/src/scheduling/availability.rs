//! Day availability
//!
//! Reuses the conflict-axis queries to report the busy slots of a
//! professional and/or a venue on a given date.

use bookwell_common::Result;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::store;

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRequest {
    pub date: NaiveDate,
    pub professional_id: Option<Uuid>,
    pub local_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub title: String,
    /// Which axis the slot occupies: "professional" or "local".
    pub slot_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub is_available: bool,
    pub busy_slots: Vec<TimeSlot>,
}

/// Collect busy slots for whichever axes were supplied, sorted by start time.
pub async fn day_availability(
    conn: &mut SqliteConnection,
    req: &AvailabilityRequest,
) -> Result<AvailabilityResult> {
    let mut busy_slots = Vec::new();

    if let Some(professional_id) = req.professional_id {
        let sessions = store::sessions::sessions_by_professional_and_date(
            conn,
            professional_id,
            req.date,
            None,
        )
        .await?;
        for session in sessions {
            busy_slots.push(TimeSlot {
                start: session.start_time,
                end: session.end_time,
                title: session.title,
                slot_type: "professional".to_string(),
            });
        }
    }

    if let Some(local_id) = req.local_id {
        let sessions =
            store::sessions::sessions_by_local_and_date(conn, local_id, req.date, None).await?;
        for session in sessions {
            busy_slots.push(TimeSlot {
                start: session.start_time,
                end: session.end_time,
                title: session.title,
                slot_type: "local".to_string(),
            });
        }
    }

    busy_slots.sort_by_key(|slot| slot.start);

    Ok(AvailabilityResult {
        is_available: busy_slots.is_empty(),
        busy_slots,
    })
}
