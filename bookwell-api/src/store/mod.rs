//! Repository layer over SQLite
//!
//! All mutating operations run inside an explicit transaction obtained
//! through [`Store::with_write_tx`]; query functions take the transaction
//! connection as an argument rather than relying on any ambient state.

pub mod catalog;
pub mod memberships;
pub mod sessions;

use bookwell_common::{Error, Result};
use futures::future::BoxFuture;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use std::time::Duration;
use tracing::warn;

/// How many times a write transaction is attempted before the busy error
/// is surfaced to the caller.
const MAX_TX_ATTEMPTS: u32 = 3;

/// Base backoff between transaction attempts; multiplied by the attempt
/// number.
const TX_RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Handle to the relational store.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Acquire a plain connection for read-only work.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Run `op` inside a single write transaction.
    ///
    /// Commits on success and rolls back on any error, so a batch that fails
    /// partway through leaves nothing behind. Transactions that lose the
    /// SQLite write lock race (busy/locked) are retried a bounded number of
    /// times with backoff; the conflict check re-runs on every attempt, which
    /// closes the check-then-act window between concurrent schedulers.
    pub async fn with_write_tx<T, F>(&self, op: F) -> Result<T>
    where
        T: Send,
        F: for<'t> Fn(&'t mut SqliteConnection) -> BoxFuture<'t, Result<T>> + Send + Sync,
    {
        let mut attempt: u32 = 0;
        loop {
            let mut tx = self.pool.begin().await?;
            match op(&mut *tx).await {
                Ok(value) => {
                    tx.commit().await?;
                    return Ok(value);
                }
                Err(err) if is_retryable(&err) && attempt + 1 < MAX_TX_ATTEMPTS => {
                    tx.rollback().await?;
                    attempt += 1;
                    warn!(attempt, "write transaction lost the lock race, retrying");
                    tokio::time::sleep(TX_RETRY_BACKOFF * attempt).await;
                }
                Err(err) => {
                    tx.rollback().await?;
                    return Err(err);
                }
            }
        }
    }
}

/// SQLITE_BUSY (5) and SQLITE_LOCKED (6) are transient lock contention;
/// everything else is surfaced as-is.
fn is_retryable(err: &Error) -> bool {
    match err {
        Error::Database(sqlx::Error::Database(db)) => {
            matches!(db.code().as_deref(), Some("5") | Some("6") | Some("261") | Some("517"))
                || db.message().contains("database is locked")
        }
        _ => false,
    }
}
