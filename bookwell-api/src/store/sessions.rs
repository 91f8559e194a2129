//! Session queries

use bookwell_common::db::models::{Session, SessionState};
use bookwell_common::{Error, Result};
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

const SESSION_COLUMNS: &str = "id, title, date, start_time, end_time, state, registered_count, \
                               capacity, session_link, professional_id, local_id, community_service_id";

/// Optional filters for session listing; empty vectors mean no filter.
#[derive(Debug, Default)]
pub struct SessionFilter {
    pub professional_ids: Vec<Uuid>,
    pub local_ids: Vec<Uuid>,
    pub states: Vec<SessionState>,
}

pub async fn insert_session(conn: &mut SqliteConnection, session: &Session) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO sessions (id, title, date, start_time, end_time, state, registered_count,
                              capacity, session_link, professional_id, local_id, community_service_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(session.id)
    .bind(&session.title)
    .bind(session.date)
    .bind(session.start_time)
    .bind(session.end_time)
    .bind(session.state)
    .bind(session.registered_count)
    .bind(session.capacity)
    .bind(&session.session_link)
    .bind(session.professional_id)
    .bind(session.local_id)
    .bind(session.community_service_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn get_session(conn: &mut SqliteConnection, id: Uuid) -> Result<Session> {
    let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?");
    sqlx::query_as::<_, Session>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| Error::NotFound("Session not found".to_string()))
}

/// Persist a fully merged session row.
///
/// The lifecycle manager merges partial updates onto the loaded row first,
/// so a whole-row update keeps the SQL static.
pub async fn update_session(conn: &mut SqliteConnection, session: &Session) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE sessions
        SET title = ?, date = ?, start_time = ?, end_time = ?, state = ?,
            registered_count = ?, capacity = ?, session_link = ?,
            professional_id = ?, local_id = ?, community_service_id = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&session.title)
    .bind(session.date)
    .bind(session.start_time)
    .bind(session.end_time)
    .bind(session.state)
    .bind(session.registered_count)
    .bind(session.capacity)
    .bind(&session.session_link)
    .bind(session.professional_id)
    .bind(session.local_id)
    .bind(session.community_service_id)
    .bind(session.id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Session not found".to_string()));
    }

    Ok(())
}

pub async fn delete_session(conn: &mut SqliteConnection, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Session not found".to_string()));
    }

    Ok(())
}

/// Fetch all sessions matching the filter, ordered by date and start time.
pub async fn list_sessions(
    conn: &mut SqliteConnection,
    filter: &SessionFilter,
) -> Result<Vec<Session>> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE 1 = 1"));

    if !filter.professional_ids.is_empty() {
        builder.push(" AND professional_id IN (");
        let mut separated = builder.separated(", ");
        for id in &filter.professional_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");
    }
    if !filter.local_ids.is_empty() {
        builder.push(" AND local_id IN (");
        let mut separated = builder.separated(", ");
        for id in &filter.local_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");
    }
    if !filter.states.is_empty() {
        builder.push(" AND state IN (");
        let mut separated = builder.separated(", ");
        for state in &filter.states {
            separated.push_bind(*state);
        }
        separated.push_unseparated(")");
    }

    builder.push(" ORDER BY date, start_time");

    let sessions = builder
        .build_query_as::<Session>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(sessions)
}

/// Professional-axis conflict candidates: every non-cancelled session for the
/// professional on the given date, minus the excluded session (if any).
pub async fn sessions_by_professional_and_date(
    conn: &mut SqliteConnection,
    professional_id: Uuid,
    date: NaiveDate,
    exclude_id: Option<Uuid>,
) -> Result<Vec<Session>> {
    let sql = format!(
        "SELECT {SESSION_COLUMNS} FROM sessions \
         WHERE professional_id = ? AND date = ? AND state <> 'CANCELLED' \
           AND (? IS NULL OR id <> ?) \
         ORDER BY start_time"
    );
    let sessions = sqlx::query_as::<_, Session>(&sql)
        .bind(professional_id)
        .bind(date)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(sessions)
}

/// Venue-axis conflict candidates; same shape as the professional axis.
pub async fn sessions_by_local_and_date(
    conn: &mut SqliteConnection,
    local_id: Uuid,
    date: NaiveDate,
    exclude_id: Option<Uuid>,
) -> Result<Vec<Session>> {
    let sql = format!(
        "SELECT {SESSION_COLUMNS} FROM sessions \
         WHERE local_id = ? AND date = ? AND state <> 'CANCELLED' \
           AND (? IS NULL OR id <> ?) \
         ORDER BY start_time"
    );
    let sessions = sqlx::query_as::<_, Session>(&sql)
        .bind(local_id)
        .bind(date)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(sessions)
}
