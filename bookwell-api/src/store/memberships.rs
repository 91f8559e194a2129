//! Membership and community-plan queries

use bookwell_common::db::models::{CommunityPlan, Membership};
use bookwell_common::{Error, Result};
use sqlx::SqliteConnection;
use uuid::Uuid;

const MEMBERSHIP_COLUMNS: &str =
    "id, description, start_date, end_date, status, community_id, user_id, plan_id";

pub async fn community_plan_exists(
    conn: &mut SqliteConnection,
    community_id: Uuid,
    plan_id: Uuid,
) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM community_plans WHERE community_id = ? AND plan_id = ?)",
    )
    .bind(community_id)
    .bind(plan_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(exists)
}

pub async fn insert_community_plan(
    conn: &mut SqliteConnection,
    association: &CommunityPlan,
) -> Result<()> {
    sqlx::query("INSERT INTO community_plans (community_id, plan_id) VALUES (?, ?)")
        .bind(association.community_id)
        .bind(association.plan_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

pub async fn insert_membership(conn: &mut SqliteConnection, membership: &Membership) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO memberships (id, description, start_date, end_date, status,
                                 community_id, user_id, plan_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(membership.id)
    .bind(&membership.description)
    .bind(membership.start_date)
    .bind(membership.end_date)
    .bind(membership.status)
    .bind(membership.community_id)
    .bind(membership.user_id)
    .bind(membership.plan_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn get_membership(conn: &mut SqliteConnection, id: Uuid) -> Result<Membership> {
    let sql = format!("SELECT {MEMBERSHIP_COLUMNS} FROM memberships WHERE id = ?");
    sqlx::query_as::<_, Membership>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| Error::NotFound("Membership not found".to_string()))
}

pub async fn delete_membership(conn: &mut SqliteConnection, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM memberships WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Membership not found".to_string()));
    }

    Ok(())
}

pub async fn count_memberships(conn: &mut SqliteConnection) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM memberships")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}
