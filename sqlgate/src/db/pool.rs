use sqlx::mysql::types::MySqlTime;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use super::{Executor, QueryOutcome};
use crate::types::{Row, Value};
use crate::BoxError;

#[async_trait::async_trait]
impl Executor for MySqlPool {
    fn is_ready(&self) -> bool {
        !self.is_closed()
    }

    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, BoxError> {
        let mut query = sqlx::query(sql);
        binds!(params, query);
        let rows = query.fetch_all(self).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryOutcome, BoxError> {
        let mut query = sqlx::query(sql);
        binds!(params, query);
        let result = query.execute(self).await?;
        // sqlx keeps the OK packet's info string to itself, so the changed-rows
        // counter is not available here.
        Ok(QueryOutcome {
            rows_affected: result.rows_affected(),
            changed_rows: 0,
            last_insert_id: result.last_insert_id(),
        })
    }
}

fn decode_row(row: &MySqlRow) -> Result<Row, BoxError> {
    let mut decoded = Row::with_capacity(row.len());
    for column in row.columns() {
        let index = column.ordinal();
        let value = if row.try_get_raw(index)?.is_null() {
            Value::Null
        } else {
            decode_value(row, index, column.type_info().name())?
        };
        decoded.push(column.name(), value);
    }
    Ok(decoded)
}

fn decode_value(row: &MySqlRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    let value = match type_name {
        "NULL" => Value::Null,
        "BOOLEAN" => Value::Bool(row.try_get_unchecked(index)?),
        name if name.ends_with("UNSIGNED") => Value::UInt(row.try_get_unchecked(index)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
            Value::Int(row.try_get_unchecked(index)?)
        }
        "FLOAT" => Value::Float(row.try_get_unchecked::<f32, _>(index)?.into()),
        "DOUBLE" => Value::Float(row.try_get_unchecked(index)?),
        "DATETIME" | "TIMESTAMP" => Value::Timestamp(row.try_get(index)?),
        "DATE" => row.try_get::<chrono::NaiveDate, _>(index)?.into(),
        // TIME spans -838:59:59..=838:59:59, wider than a time of day.
        "TIME" => Value::Text(row.try_get::<MySqlTime, _>(index)?.to_string()),
        // DECIMAL, JSON, ENUM and the text family all arrive as strings.
        _ => match row.try_get_unchecked::<String, _>(index) {
            Ok(text) => Value::Text(text),
            Err(_) => {
                let bytes: Vec<u8> = row.try_get_unchecked(index)?;
                Value::Text(String::from_utf8_lossy(&bytes).into_owned())
            }
        },
    };
    Ok(value)
}
