//! The `db` module provides functionality for interacting with the database.
//!
//! It holds the [`Executor`] seam that the gateway talks to, its MySQL pool
//! implementation, the gateway operations themselves and the query builders
//! used to compose their statements.
use std::sync::Arc;

use serde::Serialize;

use crate::types::{Row, Value};
use crate::BoxError;

/// Gateway operations on [`crate::Database`].
pub mod gateway;

/// [`Executor`] implementation backed by a `sqlx` MySQL pool.
pub mod pool;

pub mod query;

pub const PLACEHOLDER: &str = "?";

/// Counters reported by the server for a statement that returns no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    pub rows_affected: u64,
    /// Rows whose stored values actually changed. Zero when the driver does
    /// not report it.
    pub changed_rows: u64,
    pub last_insert_id: u64,
}

/// Result of [`crate::Database::insert_batch_overwrite`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub inserted: u64,
    pub affected: u64,
    pub changed: u64,
}

impl From<QueryOutcome> for BatchSummary {
    /// MySQL counts a fresh insert once in `affected` and a key collision
    /// that updates the row twice in `affected` and once in `changed`.
    fn from(outcome: QueryOutcome) -> Self {
        let affected = outcome.rows_affected;
        let changed = outcome.changed_rows;
        Self {
            inserted: affected.saturating_sub(changed),
            affected,
            changed,
        }
    }
}

/// Something that can run a parameterized statement.
///
/// Implemented for [`sqlx::MySqlPool`]; tests provide their own recording
/// implementations. Each call is an independent round trip, so implementors
/// need no coordination between concurrent calls beyond what their pool
/// already does.
#[async_trait::async_trait]
pub trait Executor: Send + Sync {
    /// Whether the underlying pool can still hand out connections.
    fn is_ready(&self) -> bool {
        true
    }

    /// Runs a row-returning statement.
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, BoxError>;

    /// Runs a statement and reports its counters.
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryOutcome, BoxError>;
}

#[async_trait::async_trait]
impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, BoxError> {
        (**self).fetch_all(sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryOutcome, BoxError> {
        (**self).execute(sql, params).await
    }
}
