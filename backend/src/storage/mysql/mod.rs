//! # MySQL Storage Module
//!
//! Production storage backend. Queries are shared with the SQLite backend
//! through [`crate::storage::queries`]; the test suite exercises them there.

pub mod connection;
pub mod crypto_currency_repository;

pub use connection::MySqlConnection;
pub use crypto_currency_repository::MySqlCryptoCurrencyRepository;
