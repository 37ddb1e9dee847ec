//! # REST API Interface Layer
//!
//! HTTP endpoints for cryptocurrency voting. This layer parses path ids and
//! JSON bodies, calls the domain service, and translates domain errors into
//! status codes with JSON error bodies. It holds no business rules.

pub mod crypto_currency_apis;
pub mod error;
pub mod mappers;

pub use crypto_currency_apis::route_not_found;
pub use error::ApiError;
