use chrono::{DateTime, Local, TimeZone};

use crate::db::{query::Query, PLACEHOLDER};
use crate::types::Value;

pub const SQL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats `date` as `YYYY-MM-DD HH:MM:SS` in the process's local time zone.
pub fn format_sql_timestamp<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Local)
        .format(SQL_TIMESTAMP_FORMAT)
        .to_string()
}

/// Renders `query` with its parameters written into the SQL text.
///
/// Only meant for logs: the output is never executed.
pub fn inline_params(query: &Query) -> String {
    let mut params = query.params.iter();
    let mut parts = query.sql.split(PLACEHOLDER);
    let mut rendered = parts.next().unwrap_or_default().to_owned();
    for part in parts {
        match params.next() {
            Some(value) => rendered.push_str(&to_literal(value)),
            None => rendered.push_str(PLACEHOLDER),
        }
        rendered.push_str(part);
    }
    rendered
}

fn to_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_owned(),
        Value::Bool(true) => "1".to_owned(),
        Value::Bool(false) => "0".to_owned(),
        Value::Text(_) | Value::Timestamp(_) => {
            format!("'{}'", value.to_string().replace('\'', "''"))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};

    #[test]
    fn timestamp_is_zero_padded_at_new_year_midnight() {
        let date = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_sql_timestamp(&date), "2024-01-01 00:00:00");
    }

    #[test]
    fn timestamp_pads_every_component() {
        let date = Local.with_ymd_and_hms(2023, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(format_sql_timestamp(&date), "2023-03-05 07:08:09");
    }

    #[test]
    fn zoned_timestamp_is_converted_to_local_time() {
        let utc = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 30, 23, 59, 59)
            .unwrap();
        let expected = utc
            .with_timezone(&Local)
            .naive_local()
            .format(SQL_TIMESTAMP_FORMAT)
            .to_string();
        assert_eq!(format_sql_timestamp(&utc), expected);
    }

    #[test]
    fn inline_params_quotes_text_and_escapes() {
        let query = Query::new(
            "INSERT INTO users SET name = ?, age = ?, admin = ?, note = ?, seen = ?",
            vec![
                Value::from("o'neil"),
                Value::Int(40),
                Value::Bool(true),
                Value::Null,
                NaiveDate::from_ymd_opt(2024, 2, 3)
                    .unwrap()
                    .and_hms_opt(4, 5, 6)
                    .unwrap()
                    .into(),
            ],
        );
        assert_eq!(
            inline_params(&query),
            "INSERT INTO users SET name = 'o''neil', age = 40, admin = 1, note = NULL, seen = '2024-02-03 04:05:06'"
        );
    }

    #[test]
    fn inline_params_leaves_unbound_placeholders() {
        let query = Query::new("SELECT ? , ?", vec![Value::Int(1)]);
        assert_eq!(inline_params(&query), "SELECT 1 , ?");
    }
}
