//! # Storage Traits
//!
//! The abstraction the domain layer uses to reach the `crypto_vote` table.
//! Each backend (MySQL, SQLite) implements it in its own module.

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::{CryptoCurrency, VoteKind};

/// Typed failures a backend reports through `anyhow` so the domain can
/// recognise them with `downcast_ref`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("A cryptocurrency named '{0}' is already stored")]
    DuplicateName(String),
}

/// Trait defining the data-access operations for cryptocurrency records
#[async_trait]
pub trait CryptoCurrencyStorage: Send + Sync {
    /// All records, ordered by id
    async fn list(&self) -> Result<Vec<CryptoCurrency>>;

    /// Retrieve a specific record by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<CryptoCurrency>>;

    async fn exists_by_id(&self, id: i64) -> Result<bool>;

    /// Exact, case-sensitive name match
    async fn exists_by_name(&self, name: &str) -> Result<bool>;

    /// Insert a new record with both counters at zero.
    /// Returns the storage-assigned id, or [`StorageError::DuplicateName`]
    /// when the unique constraint on `name` fires.
    async fn insert(&self, name: &str) -> Result<i64>;

    /// Add one to the selected counter in a single relative update.
    /// Returns true if a row was updated, false if the id does not exist.
    async fn increment_vote(&self, id: i64, kind: VoteKind) -> Result<bool>;

    /// Remove a record.
    /// Returns true if a row was deleted, false if the id does not exist.
    async fn delete(&self, id: i64) -> Result<bool>;
}
