pub mod builder;
pub mod condition;
pub mod statement;

use crate::types::Value;

/// SQL text with `?` placeholders and the values bound to them, in order.
///
/// Used both for clause fragments and for complete statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Query {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}
