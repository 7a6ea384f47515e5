/// Builds an ordered [`Clause`](crate::db::query::condition::Clause) from
/// `column = value` pairs. Column names that are not valid identifiers can be
/// given as string literals with `=>`.
///
/// # Example
///
/// ```
/// use sqlgate::prelude::*;
///
/// let filter = clause!(status = "active", owner_id = 7);
/// assert_eq!(filter.len(), 2);
///
/// let quoted = clause!("job-type" => "batch");
/// assert_eq!(quoted.get("job-type"), Some(&Value::from("batch")));
/// ```
#[macro_export]
macro_rules! clause {
    () => {
        $crate::db::query::condition::Clause::new()
    };

    ($($field:ident = $value:expr),+ $(,)?) => {
        {
            let mut clause = $crate::db::query::condition::Clause::new();
            $(
                clause.insert(stringify!($field), $value);
            )+
            clause
        }
    };

    ($($field:literal => $value:expr),+ $(,)?) => {
        {
            let mut clause = $crate::db::query::condition::Clause::new();
            $(
                clause.insert($field, $value);
            )+
            clause
        }
    };
}

macro_rules! binds {
    ($args:expr, $stream:expr) => {{
        use $crate::types::Value;
        for arg in $args {
            $stream = match arg {
                Value::Null => $stream.bind(Option::<String>::None),
                Value::Bool(value) => $stream.bind(*value),
                Value::Int(value) => $stream.bind(*value),
                Value::UInt(value) => $stream.bind(*value),
                Value::Float(value) => $stream.bind(*value),
                Value::Text(value) => $stream.bind(value.clone()),
                Value::Timestamp(value) => $stream.bind(*value),
            };
        }
    }};
}
