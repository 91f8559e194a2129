//! Bulk operation coordination
//!
//! Batches run inside a single write transaction owned by the caller; the
//! helpers here enforce the ordering and empty-list policies.

use bookwell_common::{Error, Result};
use futures::future::BoxFuture;
use sqlx::SqliteConnection;

/// Empty-list policy for creation batches: reject with a validation error.
/// Deletion batches do not call this; an empty deletion is a no-op.
pub fn require_items<T>(items: &[T], what: &str) -> Result<()> {
    if items.is_empty() {
        return Err(Error::Validation(format!("{what} list must not be empty")));
    }
    Ok(())
}

/// Apply `op` to each item in input order inside the caller's transaction.
///
/// The first failing item short-circuits the rest and its error is what the
/// caller sees; rolling back the surrounding transaction discards any items
/// already applied, giving the batch all-or-nothing semantics.
pub async fn apply_ordered<Req, Out, F>(
    conn: &mut SqliteConnection,
    items: &[Req],
    mut op: F,
) -> Result<Vec<Out>>
where
    F: for<'t> FnMut(&'t mut SqliteConnection, &'t Req) -> BoxFuture<'t, Result<Out>>,
{
    let mut applied = Vec::with_capacity(items.len());
    for item in items {
        applied.push(op(&mut *conn, item).await?);
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_batches_reject_empty_input() {
        let items: [u8; 0] = [];
        let err = require_items(&items, "sessions").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn non_empty_batches_pass() {
        assert!(require_items(&[1], "sessions").is_ok());
    }
}
