/// This module contains the macros used in the crate.
#[macro_use]
mod macros;

/// Connection settings.
pub mod config;

/// This module contains the database-related functionality.
pub mod db;

pub mod error;

/// This module contains the prelude for the crate.
pub mod prelude;

/// Scalar values and result rows.
pub mod types;

pub mod utils;

pub use config::DatabaseConfig;
pub use db::PLACEHOLDER;
pub use error::{BoxError, Error, Result};

use sqlx::mysql::MySqlPoolOptions;

/// The pooled MySQL connection handle owned by a [`Database`].
pub type Connection = sqlx::MySqlPool;

/// Represents a database: the gateway every operation goes through.
///
/// The connection is created once by the caller and owned here; clone the
/// handle (or share the `Database`) instead of creating more pools.
#[derive(Debug, Clone)]
pub struct Database<C = Connection> {
    pub conn: C,
}

impl<C> Database<C> {
    /// Wraps an already constructed executor.
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

impl Database<Connection> {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let conn = MySqlPoolOptions::new()
            .max_connections(config.connection_limit)
            .connect_with(config.connect_options())
            .await
            .map_err(Error::Connect)?;
        tracing::info!(
            host = %config.host,
            port = config.port,
            connection_limit = config.connection_limit,
            "Pool created"
        );
        Ok(Self { conn })
    }

    /// [`DatabaseConfig::from_env`] followed by [`Database::connect`].
    pub async fn from_env() -> Result<Self> {
        Self::connect(&DatabaseConfig::from_env()?).await
    }

    /// Closes the pool; later operations fail with
    /// [`Error::PoolNotInitialized`].
    pub async fn close(&self) {
        self.conn.close().await;
    }
}
