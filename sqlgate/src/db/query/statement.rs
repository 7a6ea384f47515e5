//! Full statement composition on top of the clause builders.

use super::builder;
use super::condition::{Clause, Join};
use super::Query;
use crate::db::PLACEHOLDER;
use crate::types::{Row, Value};

/// Optional filters and join for a `SELECT`.
///
/// # Example
/// ```
/// use sqlgate::prelude::*;
///
/// let options = SelectOptions::new()
///     .filter(clause!(status = "active"))
///     .join(Join::new(JoinType::Left, "owners", "owners.id = jobs.owner_id").columns(["name"]));
/// assert!(options.like_clause.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub where_clause: Option<Clause>,
    pub like_clause: Option<Clause>,
    pub join: Option<Join>,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, clause: Clause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    pub fn like(mut self, clause: Clause) -> Self {
        self.like_clause = Some(clause);
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.join = Some(join);
        self
    }
}

pub fn select(table: &str, options: &SelectOptions) -> Query {
    let mut sql = match &options.join {
        Some(join) => {
            let mut projection = vec![format!("{table}.*")];
            projection.extend(
                join.columns
                    .iter()
                    .map(|column| format!("{}.{column}", join.table)),
            );
            format!(
                "SELECT {projection} FROM {table} {join_type} JOIN {join_table} ON {on}",
                projection = projection.join(", "),
                join_type = join.join_type,
                join_table = join.table,
                on = join.on,
            )
        }
        None => format!("SELECT * FROM {table}"),
    };

    let conditions = builder::combine_conditions(
        builder::where_clause(table, options.where_clause.as_ref()),
        builder::like_clause(table, options.like_clause.as_ref()),
    );
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.sql);
    }
    Query::new(sql, conditions.params)
}

pub fn update(table: &str, values: &Clause, where_clause: &Clause) -> Query {
    let set = builder::set_clause(values);
    let condition = builder::where_clause(table, Some(where_clause));
    let mut params = set.params;
    params.extend(condition.params);
    Query::new(
        format!("UPDATE {table} SET {} WHERE {}", set.sql, condition.sql),
        params,
    )
}

/// Multi-row upsert. The column list comes from the first record; a column
/// missing from a later record is bound as `NULL`.
pub fn insert_batch_overwrite(table: &str, records: &[Row]) -> Query {
    let columns: Vec<&str> = records
        .first()
        .map(|first| first.columns().collect())
        .unwrap_or_default();

    let row_placeholders = format!("({})", vec![PLACEHOLDER; columns.len()].join(", "));
    let values = vec![row_placeholders.as_str(); records.len()].join(", ");

    let params = records
        .iter()
        .flat_map(|record| {
            columns
                .iter()
                .map(move |column| record.get(column).cloned().unwrap_or(Value::Null))
        })
        .collect();

    let column_list = columns
        .iter()
        .map(|column| format!("`{column}`"))
        .collect::<Vec<_>>()
        .join(", ");
    let updates = columns
        .iter()
        .map(|column| format!("`{column}` = VALUES(`{column}`)"))
        .collect::<Vec<_>>()
        .join(", ");

    Query::new(
        format!(
            "INSERT INTO {table} ({column_list}) VALUES {values} ON DUPLICATE KEY UPDATE {updates}"
        ),
        params,
    )
}

pub fn delete_all(table: &str) -> Query {
    Query::new(format!("DELETE FROM {table}"), Vec::new())
}

pub fn delete_older_than(table: &str, column: &str, cutoff: impl Into<Value>) -> Query {
    Query::new(
        format!("DELETE FROM {table} WHERE {column} < {PLACEHOLDER}"),
        vec![cutoff.into()],
    )
}

pub fn insert_set(table: &str, values: &Clause) -> Query {
    let set = builder::set_clause(values);
    Query::new(format!("INSERT INTO {table} SET {}", set.sql), set.params)
}
