//! # Domain Module
//!
//! Business rules for cryptocurrency voting, independent of HTTP and of the
//! storage engine.
//!
//! ## Business Rules
//!
//! - Names are non-empty, unique (case-sensitive) and never a bare integer
//! - New records start with zero up and down votes
//! - A vote adds exactly one to one counter
//! - The total is always the sum of the two counters

pub mod commands;
pub mod crypto_currency_service;
pub mod errors;
pub mod models;
pub mod validation;

pub use commands::CreateCryptoCurrencyCommand;
pub use crypto_currency_service::CryptoCurrencyService;
pub use errors::{CryptoVoteError, CryptoVoteResult, NameValidationError};
pub use models::{CryptoCurrency, VoteKind};
