//! Connection settings, read from the environment (and a `.env` file when
//! present).

use sqlx::mysql::MySqlConnectOptions;

use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 25060;
pub const CONNECTION_LIMIT: u32 = 10;

#[derive(Clone)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Default schema; statements must qualify table names when unset.
    pub database: Option<String>,
    pub connection_limit: u32,
}

impl DatabaseConfig {
    pub fn new(user: impl Into<String>, password: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            host: host.into(),
            port: DEFAULT_PORT,
            database: None,
            connection_limit: CONNECTION_LIMIT,
        }
    }

    /// Reads `DB_USER`, `DB_PWD` and `DB_HOST`, plus the optional `DB_NAME`
    /// and `DB_PORT`.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| Error::Config(format!("environment variable `{key}` is not set")))
        };

        let mut config = Self::new(required("DB_USER")?, required("DB_PWD")?, required("DB_HOST")?);
        config.database = lookup("DB_NAME").filter(|name| !name.is_empty());
        if let Some(port) = lookup("DB_PORT") {
            config.port = port
                .parse()
                .map_err(|_| Error::Config(format!("`DB_PORT` is not a valid port: {port}")))?;
        }
        Ok(config)
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password);
        match &self.database {
            Some(database) => options.database(database),
            None => options,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("connection_limit", &self.connection_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_required_settings_with_fixed_defaults() {
        let config = DatabaseConfig::from_lookup(lookup(&[
            ("DB_USER", "app"),
            ("DB_PWD", "secret"),
            ("DB_HOST", "db.internal"),
        ]))
        .unwrap();

        assert_eq!(config.user, "app");
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.connection_limit, CONNECTION_LIMIT);
        assert_eq!(config.database, None);
    }

    #[test]
    fn optional_settings_override_defaults() {
        let config = DatabaseConfig::from_lookup(lookup(&[
            ("DB_USER", "app"),
            ("DB_PWD", "secret"),
            ("DB_HOST", "db.internal"),
            ("DB_NAME", "news"),
            ("DB_PORT", "3306"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3306);
        assert_eq!(config.database.as_deref(), Some("news"));
    }

    #[test]
    fn missing_host_is_a_config_error() {
        let err = DatabaseConfig::from_lookup(lookup(&[("DB_USER", "app"), ("DB_PWD", "secret")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("DB_HOST")));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = DatabaseConfig::from_lookup(lookup(&[
            ("DB_USER", "app"),
            ("DB_PWD", "secret"),
            ("DB_HOST", "h"),
            ("DB_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn debug_output_hides_password() {
        let config = DatabaseConfig::new("app", "hunter2", "localhost");
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
