//! Database row models

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Lifecycle state of a session.
///
/// Transitions between states are driven by an external scheduler; the API
/// stores whatever state it is told and never infers transitions itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum SessionState {
    Scheduled,
    OnGoing,
    Completed,
    Cancelled,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Scheduled => "SCHEDULED",
            SessionState::OnGoing => "ONGOING",
            SessionState::Completed => "COMPLETED",
            SessionState::Cancelled => "CANCELLED",
        }
    }
}

impl std::str::FromStr for SessionState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SCHEDULED" => Ok(SessionState::Scheduled),
            "ONGOING" => Ok(SessionState::OnGoing),
            "COMPLETED" => Ok(SessionState::Completed),
            "CANCELLED" => Ok(SessionState::Cancelled),
            other => Err(Error::Validation(format!("Unknown session state: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    Active,
    OnHold,
    Expired,
    Cancelled,
}

/// A bookable time slot owned by a professional, optionally tied to a venue.
///
/// A session with no `local_id` is virtual; the venue axis of conflict
/// checking is skipped for it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub state: SessionState,
    pub registered_count: i64,
    pub capacity: i64,
    pub session_link: Option<String>,
    pub professional_id: Uuid,
    pub local_id: Option<Uuid>,
    pub community_service_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    pub specialty: Option<String>,
    pub email: Option<String>,
}

/// A physical venue (named "local" throughout the booking domain).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Local {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Community {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub fee: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Association record authorizing a plan to be offered within a community.
///
/// Required to exist before a membership may bind a user to that
/// community+plan pair.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommunityPlan {
    pub community_id: Uuid,
    pub plan_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: MembershipStatus,
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
}
