//! # Storage Module
//!
//! Persistence for cryptocurrency records. The domain layer only sees the
//! [`CryptoCurrencyStorage`] trait; the concrete backend is picked from the
//! configuration at startup.
//!
//! - **mysql**: production backend
//! - **sqlite**: local development and tests
//! - **queries**: SQL text shared by both

pub mod mysql;
pub mod queries;
pub mod sqlite;
pub mod traits;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::mysql::MySqlConnectOptions;
use tracing::info;

use crate::config::DatabaseConfig;

pub use mysql::{MySqlConnection, MySqlCryptoCurrencyRepository};
pub use sqlite::{SqliteConnection, SqliteCryptoCurrencyRepository};
pub use traits::{CryptoCurrencyStorage, StorageError};

/// Connect to the configured backend and return its repository
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn CryptoCurrencyStorage>> {
    info!("Connecting to {} storage", config.backend());

    let storage: Arc<dyn CryptoCurrencyStorage> = match config {
        DatabaseConfig::MySql(settings) => {
            let options = MySqlConnectOptions::new()
                .host(&settings.host)
                .port(settings.port)
                .username(&settings.user)
                .password(&settings.password)
                .database(&settings.name);
            let db = MySqlConnection::connect(options).await?;
            Arc::new(MySqlCryptoCurrencyRepository::new(db))
        }
        DatabaseConfig::MySqlUrl(url) => {
            let options = MySqlConnectOptions::from_str(url).context("Invalid MySQL URL")?;
            let db = MySqlConnection::connect(options).await?;
            Arc::new(MySqlCryptoCurrencyRepository::new(db))
        }
        DatabaseConfig::Sqlite(url) => {
            let db = SqliteConnection::connect(url).await?;
            Arc::new(SqliteCryptoCurrencyRepository::new(db))
        }
    };

    Ok(storage)
}
