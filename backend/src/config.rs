//! Process configuration, read once from the environment at startup.

use std::{env, fmt};

use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_USER: &str = "root";
pub const DEFAULT_DB_HOST: &str = "127.0.0.1";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_DB_NAME: &str = "cryptovote";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': expected a port number")]
    InvalidPort { key: &'static str, value: String },

    #[error("Unsupported DATABASE_URL scheme: expected mysql: or sqlite:")]
    UnsupportedDatabaseUrl,
}

/// MySQL connection parts supplied through `DB_*` variables
#[derive(Clone, PartialEq, Eq)]
pub struct MySqlSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

impl fmt::Debug for MySqlSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlSettings")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .finish()
    }
}

/// Where the records live
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    MySql(MySqlSettings),
    MySqlUrl(String),
    Sqlite(String),
}

impl DatabaseConfig {
    /// Short backend name, safe to log
    pub fn backend(&self) -> &'static str {
        match self {
            DatabaseConfig::MySql(_) | DatabaseConfig::MySqlUrl(_) => "mysql",
            DatabaseConfig::Sqlite(_) => "sqlite",
        }
    }
}

// URLs may embed credentials, so only the backend is printed
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseConfig::MySql(settings) => f.debug_tuple("MySql").field(settings).finish(),
            DatabaseConfig::MySqlUrl(_) => f.write_str("MySqlUrl(<redacted>)"),
            DatabaseConfig::Sqlite(url) => f.debug_tuple("Sqlite").field(url).finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_port("PORT", lookup("PORT"), DEFAULT_PORT)?;

        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => database_from_url(url)?,
            None => DatabaseConfig::MySql(MySqlSettings {
                user: or_default("DB_USER", lookup("DB_USER"), DEFAULT_DB_USER),
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                host: or_default("DB_HOST", lookup("DB_HOST"), DEFAULT_DB_HOST),
                port: parse_port("DB_PORT", lookup("DB_PORT"), DEFAULT_DB_PORT)?,
                name: or_default("DB_NAME", lookup("DB_NAME"), DEFAULT_DB_NAME),
            }),
        };

        Ok(Self { port, database })
    }
}

fn database_from_url(url: String) -> Result<DatabaseConfig, ConfigError> {
    if url.starts_with("sqlite:") {
        Ok(DatabaseConfig::Sqlite(url))
    } else if url.starts_with("mysql:") {
        Ok(DatabaseConfig::MySqlUrl(url))
    } else {
        Err(ConfigError::UnsupportedDatabaseUrl)
    }
}

fn or_default(key: &str, value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}

fn parse_port(key: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => v.parse().map_err(|_| {
            warn!("Invalid {key} value: {v}");
            ConfigError::InvalidPort { key, value: v }
        }),
        _ => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
