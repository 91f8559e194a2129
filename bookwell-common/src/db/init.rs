//! Database initialization
//!
//! Creates the SQLite database on first run and brings the schema up with
//! idempotent `CREATE TABLE IF NOT EXISTS` statements.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers while one writer holds the lock
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Busy timeout bounds how long a writer waits for the lock before the
    // transaction retry logic takes over
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Schema bootstrap (idempotent - safe to call multiple times)
    create_users_table(&pool).await?;
    create_professionals_table(&pool).await?;
    create_locals_table(&pool).await?;
    create_communities_table(&pool).await?;
    create_plans_table(&pool).await?;
    create_community_plans_table(&pool).await?;
    create_memberships_table(&pool).await?;
    create_sessions_table(&pool).await?;

    Ok(pool)
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BLOB PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_professionals_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS professionals (
            id BLOB PRIMARY KEY,
            name TEXT NOT NULL,
            specialty TEXT,
            email TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_locals_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locals (
            id BLOB PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT,
            capacity INTEGER,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (capacity IS NULL OR capacity > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_communities_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS communities (
            id BLOB PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_plans_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS plans (
            id BLOB PRIMARY KEY,
            name TEXT NOT NULL,
            fee REAL NOT NULL DEFAULT 0.0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (fee >= 0.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the community_plans association table
///
/// The (community_id, plan_id) pair is the primary key; a duplicate
/// association is a conflict at the service layer before it ever reaches
/// the unique constraint.
async fn create_community_plans_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS community_plans (
            community_id BLOB NOT NULL REFERENCES communities(id) ON DELETE CASCADE,
            plan_id BLOB NOT NULL REFERENCES plans(id) ON DELETE CASCADE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (community_id, plan_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_memberships_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS memberships (
            id BLOB PRIMARY KEY,
            description TEXT,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            status TEXT NOT NULL CHECK (status IN ('ACTIVE', 'ON_HOLD', 'EXPIRED', 'CANCELLED')),
            community_id BLOB NOT NULL REFERENCES communities(id),
            user_id BLOB NOT NULL REFERENCES users(id),
            plan_id BLOB NOT NULL REFERENCES plans(id),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (start_date <= end_date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_memberships_user ON memberships(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_memberships_community ON memberships(community_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the sessions table
///
/// The (professional_id, date) and (local_id, date) indexes back the two
/// conflict-axis queries.
async fn create_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id BLOB PRIMARY KEY,
            title TEXT NOT NULL,
            date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            state TEXT NOT NULL DEFAULT 'SCHEDULED'
                CHECK (state IN ('SCHEDULED', 'ONGOING', 'COMPLETED', 'CANCELLED')),
            registered_count INTEGER NOT NULL DEFAULT 0,
            capacity INTEGER NOT NULL,
            session_link TEXT,
            professional_id BLOB NOT NULL REFERENCES professionals(id),
            local_id BLOB REFERENCES locals(id) ON DELETE SET NULL,
            community_service_id BLOB,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (start_time < end_time),
            CHECK (capacity > 0),
            CHECK (registered_count >= 0 AND registered_count <= capacity)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_sessions_professional_date ON sessions(professional_id, date)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_local_date ON sessions(local_id, date)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_state ON sessions(state)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_creates_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("test.db")).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        for expected in [
            "communities",
            "community_plans",
            "locals",
            "memberships",
            "plans",
            "professionals",
            "sessions",
            "users",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing table {expected}");
        }
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let pool = init_database(&path).await.unwrap();
        drop(pool);
        init_database(&path).await.unwrap();
    }
}
