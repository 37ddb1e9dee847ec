//! # SQLite Storage Module
//!
//! SQLite implementation of the storage traits, used for local development
//! and as the in-memory backend of the test suite.

pub mod connection;
pub mod crypto_currency_repository;

pub use connection::SqliteConnection;
pub use crypto_currency_repository::SqliteCryptoCurrencyRepository;
