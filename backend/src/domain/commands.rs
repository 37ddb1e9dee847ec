//! Domain-level command types.
//!
//! The REST layer maps the DTOs from the `shared` crate into these before
//! calling the service.

/// Input for creating a new cryptocurrency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCryptoCurrencyCommand {
    pub name: String,
}
