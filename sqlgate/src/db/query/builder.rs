//! Clause formatting.
//!
//! Pure functions turning a [`Clause`] into a SQL fragment plus the parameters
//! for its placeholders. Each value yields exactly one `?`, and parameters are
//! emitted in the same order as their placeholders.

use super::condition::Clause;
use super::Query;
use crate::db::PLACEHOLDER;
use crate::types::Value;

/// `table.a = ? AND table.b = ?`
///
/// An absent or empty clause yields an empty fragment.
pub fn where_clause(table: &str, clause: Option<&Clause>) -> Query {
    let Some(clause) = clause else {
        return Query::default();
    };
    let sql = clause
        .keys()
        .map(|column| format!("{table}.{column} = {PLACEHOLDER}"))
        .collect::<Vec<_>>()
        .join(" AND ");
    Query::new(sql, clause.values().cloned().collect())
}

/// `(table.a LIKE ? OR table.b LIKE ?)`, each value bound as `%value%`.
///
/// An absent or empty clause yields an empty fragment, not a lone `)`.
pub fn like_clause(table: &str, clause: Option<&Clause>) -> Query {
    let Some(clause) = clause.filter(|clause| !clause.is_empty()) else {
        return Query::default();
    };
    let conditions = clause
        .keys()
        .map(|column| format!("{table}.{column} LIKE {PLACEHOLDER}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    let params = clause
        .values()
        .map(|value| Value::Text(format!("%{value}%")))
        .collect();
    Query::new(format!("({conditions})"), params)
}

/// `a = ?, b = ?`
///
/// Callers building `UPDATE`/`INSERT ... SET` must not pass an empty clause;
/// the resulting empty list is not valid SQL.
pub fn set_clause(clause: &Clause) -> Query {
    let sql = clause
        .keys()
        .map(|column| format!("{column} = {PLACEHOLDER}"))
        .collect::<Vec<_>>()
        .join(", ");
    Query::new(sql, clause.values().cloned().collect())
}

/// Joins an equality fragment and a `LIKE` fragment with ` AND `, keeping
/// the equality parameters first.
pub fn combine_conditions(equal: Query, like: Query) -> Query {
    match (equal.is_empty(), like.is_empty()) {
        (_, true) => equal,
        (true, false) => like,
        (false, false) => {
            let mut params = equal.params;
            params.extend(like.params);
            Query::new(format!("{} AND {}", equal.sql, like.sql), params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn where_clause_keeps_key_order() {
        let clause = Clause::new()
            .with("status", "active")
            .with("owner_id", 7)
            .with("deleted_at", Value::Null);
        let query = where_clause("jobs", Some(&clause));

        assert_eq!(
            query.sql,
            "jobs.status = ? AND jobs.owner_id = ? AND jobs.deleted_at = ?"
        );
        assert_eq!(placeholders(&query.sql), clause.len());
        assert_eq!(
            query.params,
            vec![Value::from("active"), Value::Int(7), Value::Null]
        );
    }

    #[test]
    fn where_clause_empty_and_absent() {
        assert_eq!(where_clause("jobs", None), Query::default());
        assert_eq!(where_clause("jobs", Some(&Clause::new())), Query::default());
    }

    #[test]
    fn like_clause_groups_with_or() {
        let clause = Clause::new().with("title", "rust").with("body", 42);
        let query = like_clause("posts", Some(&clause));

        assert_eq!(query.sql, "(posts.title LIKE ? OR posts.body LIKE ?)");
        assert_eq!(
            query.params,
            vec![Value::from("%rust%"), Value::from("%42%")]
        );
    }

    #[test]
    fn like_clause_single_entry() {
        let clause = Clause::new().with("title", "news");
        let query = like_clause("posts", Some(&clause));
        assert_eq!(query.sql, "(posts.title LIKE ?)");
        assert_eq!(query.params, vec![Value::from("%news%")]);
    }

    #[test]
    fn like_clause_empty_has_no_stray_paren() {
        assert_eq!(like_clause("posts", None), Query::default());
        assert_eq!(like_clause("posts", Some(&Clause::new())), Query::default());
    }

    #[test]
    fn set_clause_lists_assignments() {
        let clause = Clause::new().with("a", 1).with("b", "x");
        let query = set_clause(&clause);
        assert_eq!(query.sql, "a = ?, b = ?");
        assert_eq!(query.params, vec![Value::Int(1), Value::from("x")]);
    }

    #[test]
    fn combine_puts_equality_params_first() {
        let equal = where_clause("t", Some(&Clause::new().with("kind", "a")));
        let like = like_clause("t", Some(&Clause::new().with("name", "b")));
        let combined = combine_conditions(equal, like);

        assert_eq!(combined.sql, "t.kind = ? AND (t.name LIKE ?)");
        assert_eq!(
            combined.params,
            vec![Value::from("a"), Value::from("%b%")]
        );
    }

    #[test]
    fn combine_skips_empty_sides() {
        let like = like_clause("t", Some(&Clause::new().with("name", "b")));
        assert_eq!(combine_conditions(Query::default(), like.clone()), like);

        let equal = where_clause("t", Some(&Clause::new().with("kind", "a")));
        assert_eq!(combine_conditions(equal.clone(), Query::default()), equal);

        assert!(combine_conditions(Query::default(), Query::default()).is_empty());
    }
}
