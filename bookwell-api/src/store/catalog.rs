//! Catalog entities referenced by sessions and memberships
//!
//! These are simple existence checks and inserts; full CRUD for the catalog
//! lives outside this service.

use bookwell_common::db::models::{Community, Local, Plan, Professional, User};
use bookwell_common::Result;
use sqlx::SqliteConnection;
use uuid::Uuid;

async fn exists_in(conn: &mut SqliteConnection, table: &str, id: Uuid) -> Result<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?)");
    let exists: bool = sqlx::query_scalar(&sql)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(exists)
}

pub async fn professional_exists(conn: &mut SqliteConnection, id: Uuid) -> Result<bool> {
    exists_in(conn, "professionals", id).await
}

pub async fn local_exists(conn: &mut SqliteConnection, id: Uuid) -> Result<bool> {
    exists_in(conn, "locals", id).await
}

pub async fn user_exists(conn: &mut SqliteConnection, id: Uuid) -> Result<bool> {
    exists_in(conn, "users", id).await
}

pub async fn community_exists(conn: &mut SqliteConnection, id: Uuid) -> Result<bool> {
    exists_in(conn, "communities", id).await
}

pub async fn plan_exists(conn: &mut SqliteConnection, id: Uuid) -> Result<bool> {
    exists_in(conn, "plans", id).await
}

pub async fn insert_professional(conn: &mut SqliteConnection, p: &Professional) -> Result<()> {
    sqlx::query("INSERT INTO professionals (id, name, specialty, email) VALUES (?, ?, ?, ?)")
        .bind(p.id)
        .bind(&p.name)
        .bind(&p.specialty)
        .bind(&p.email)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn insert_local(conn: &mut SqliteConnection, local: &Local) -> Result<()> {
    sqlx::query("INSERT INTO locals (id, name, address, capacity) VALUES (?, ?, ?, ?)")
        .bind(local.id)
        .bind(&local.name)
        .bind(&local.address)
        .bind(local.capacity)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn insert_user(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    sqlx::query("INSERT INTO users (id, email, name) VALUES (?, ?, ?)")
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn insert_community(conn: &mut SqliteConnection, community: &Community) -> Result<()> {
    sqlx::query("INSERT INTO communities (id, name) VALUES (?, ?)")
        .bind(community.id)
        .bind(&community.name)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn insert_plan(conn: &mut SqliteConnection, plan: &Plan) -> Result<()> {
    sqlx::query("INSERT INTO plans (id, name, fee) VALUES (?, ?, ?)")
        .bind(plan.id)
        .bind(&plan.name)
        .bind(plan.fee)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
