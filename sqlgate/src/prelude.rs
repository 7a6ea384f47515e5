pub use super::db::query::{
    condition::{Clause, Join, JoinType},
    statement::SelectOptions,
    Query,
};
pub use super::db::{BatchSummary, Executor, QueryOutcome};
pub use super::types::{Row, Value};
pub use super::{clause, BoxError, Connection, Database, DatabaseConfig, Error, Result};
pub use async_trait::async_trait;
pub use chrono;
