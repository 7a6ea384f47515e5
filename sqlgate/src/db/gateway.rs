//! Gateway operations.
//!
//! Every operation builds its statement with [`query::statement`], logs it,
//! runs it on the owned [`Executor`] and wraps any failure in
//! [`Error::Execution`] tagged with the operation. Nothing is retried.

use chrono::{DateTime, TimeZone};
use serde::{de::DeserializeOwned, Serialize};

use super::query::{self, condition::Clause, statement::SelectOptions, Query};
use super::{BatchSummary, Executor, QueryOutcome};
use crate::types::Row;
use crate::{utils, Database, Error, Result};

const BATCH_CONTEXT: &str = "INSERT_BATCH_OVERWRITE Error";

impl<C: Executor> Database<C> {
    /// Fetches rows from `table` and deserializes each into `T`.
    ///
    /// # Arguments
    /// * `table` - The base table.
    /// * `options` - Optional equality filter, `LIKE` filter and join.
    ///
    /// # Returns
    /// Every matching row; an empty `Vec` when nothing matches.
    ///
    /// # Example
    /// ```ignore
    /// let jobs: Vec<Job> = db
    ///     .select(
    ///         "jobs",
    ///         SelectOptions::new()
    ///             .filter(clause!(status = "active"))
    ///             .like(clause!(title = "engineer")),
    ///     )
    ///     .await?;
    /// ```
    pub async fn select<T: DeserializeOwned>(&self, table: &str, options: SelectOptions) -> Result<Vec<T>> {
        let rows = self.select_rows(table, options).await?;
        rows.iter()
            .map(|row| row.deserialize::<T>())
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| Error::execution("Error in SELECT", e))
    }

    /// Like [`Database::select`], returning the rows untouched.
    pub async fn select_rows(&self, table: &str, options: SelectOptions) -> Result<Vec<Row>> {
        const CONTEXT: &str = "Error in SELECT";
        self.ensure_ready()?;
        let query = query::statement::select(table, &options);
        log_statement("SELECT", &query);
        self.conn
            .fetch_all(&query.sql, &query.params)
            .await
            .map_err(|e| fault(CONTEXT, e))
    }

    /// Applies `values` to the rows of `table` matching `where_clause`.
    ///
    /// Returns `true` only when exactly one row was affected; zero or several
    /// affected rows give `false` even though the statement succeeded.
    pub async fn update(&self, table: &str, values: &Clause, where_clause: &Clause) -> Result<bool> {
        const CONTEXT: &str = "Error in UPDATE";
        self.ensure_ready()?;
        if values.is_empty() {
            return Err(Error::execution(CONTEXT, "no values to set"));
        }
        if where_clause.is_empty() {
            return Err(Error::execution(CONTEXT, "an UPDATE needs a WHERE clause"));
        }

        let query = query::statement::update(table, values, where_clause);
        log_statement("UPDATE", &query);
        let outcome = self
            .conn
            .execute(&query.sql, &query.params)
            .await
            .map_err(|e| fault(CONTEXT, e))?;
        Ok(outcome.rows_affected == 1)
    }

    /// Inserts `rows` into `table` in one statement, overwriting every column
    /// of rows that collide on a unique or primary key.
    ///
    /// Each element must serialize to a key-value record; see
    /// [`Row::from_serialize`] for how fields map to values. Date fields only
    /// survive as text on this path, so records carrying dates should be
    /// built as [`Row`]s and passed to [`Database::insert_batch_rows`].
    pub async fn insert_batch_overwrite<T: Serialize>(&self, rows: &[T], table: &str) -> Result<BatchSummary> {
        let records = rows
            .iter()
            .map(Row::from_serialize)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::execution(BATCH_CONTEXT, e))?;
        self.insert_batch_rows(&records, table).await
    }

    /// Typed form of [`Database::insert_batch_overwrite`].
    ///
    /// The columns are taken from the first record; columns absent from a
    /// later record are written as `NULL`.
    pub async fn insert_batch_rows(&self, rows: &[Row], table: &str) -> Result<BatchSummary> {
        self.ensure_ready()?;
        if rows.is_empty() {
            return Err(Error::execution(BATCH_CONTEXT, "No data provided for batch insert."));
        }

        let query = query::statement::insert_batch_overwrite(table, rows);
        log_statement("INSERT_BATCH_OVERWRITE", &query);

        let outcome = self
            .conn
            .execute(&query.sql, &query.params)
            .await
            .map_err(|e| fault(BATCH_CONTEXT, e))?;
        let summary = BatchSummary::from(outcome);
        tracing::info!(
            table,
            affected = summary.affected,
            changed = summary.changed,
            inserted = summary.inserted,
            "INSERT_BATCH_OVERWRITE finished"
        );
        Ok(summary)
    }

    /// Deletes every row of `table`.
    pub async fn clean_table(&self, table: &str) -> Result<bool> {
        let context = format!("cleanTable failed for table: {table}");
        self.ensure_ready()?;
        let query = query::statement::delete_all(table);
        log_statement("cleanTable", &query);
        self.conn
            .execute(&query.sql, &query.params)
            .await
            .map_err(|e| fault(context, e))?;
        Ok(true)
    }

    /// Deletes the rows of `table` whose `column` is older than `cutoff`.
    ///
    /// The cutoff is sent as local wall-clock time (see
    /// [`utils::format_sql_timestamp`]); no time-zone normalization happens.
    pub async fn remove_old_entries<Tz: TimeZone>(
        &self,
        table: &str,
        cutoff: &DateTime<Tz>,
        column: &str,
    ) -> Result<()> {
        const CONTEXT: &str = "Error in removeOldEntries";
        self.ensure_ready()?;
        let cutoff = utils::format_sql_timestamp(cutoff);
        let query = query::statement::delete_older_than(table, column, cutoff);
        log_statement("removeOldEntries", &query);
        let outcome = self
            .conn
            .execute(&query.sql, &query.params)
            .await
            .map_err(|e| fault(CONTEXT, e))?;
        tracing::debug!(table, removed = outcome.rows_affected, "removed old entries");
        Ok(())
    }

    /// Inserts a single row and hands back the raw outcome, including the
    /// generated id in [`QueryOutcome::last_insert_id`].
    pub async fn insert_get_id(&self, table: &str, values: &Clause) -> Result<QueryOutcome> {
        const CONTEXT: &str = "Error in INSERT_GETID";
        self.ensure_ready()?;
        if values.is_empty() {
            return Err(Error::execution(CONTEXT, "no values to insert"));
        }

        let query = query::statement::insert_set(table, values);
        tracing::debug!(sql = %utils::inline_params(&query), "INSERT_GETID");
        self.conn
            .execute(&query.sql, &query.params)
            .await
            .map_err(|e| fault(CONTEXT, e))
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.conn.is_ready() {
            Ok(())
        } else {
            Err(Error::PoolNotInitialized)
        }
    }
}

fn fault(context: impl Into<String>, source: crate::BoxError) -> Error {
    let error = Error::execution(context, source);
    tracing::warn!(error = %error, "statement failed");
    error
}

fn log_statement(operation: &str, query: &Query) {
    #[cfg(debug_assertions)]
    let sql = sqlformat::format(
        &query.sql,
        &sqlformat::QueryParams::None,
        &sqlformat::FormatOptions::default(),
    );
    #[cfg(not(debug_assertions))]
    let sql = &query.sql;

    tracing::debug!(operation, sql = %sql, params = ?query.params, "executing statement");
}
