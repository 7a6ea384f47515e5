//! Error types for sqlgate

use thiserror::Error;

/// Boxed cause reported by an [`Executor`](crate::db::Executor).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for gateway operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The pool is gone (closed) before an operation could use it.
    #[error("Pool was not created. Ensure the pool is created when running the app.")]
    PoolNotInitialized,

    /// Any failure while building or running a statement, tagged with the
    /// operation it happened in.
    #[error("{context}: {source}")]
    Execution { context: String, source: BoxError },

    /// A required setting is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The pool could not be created.
    #[error("Failed to create pool: {0}")]
    Connect(#[source] sqlx::Error),
}

impl Error {
    pub fn execution(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Execution {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Whether this error came from statement execution.
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution { .. })
    }
}
