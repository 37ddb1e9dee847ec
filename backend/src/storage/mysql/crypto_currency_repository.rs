use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use crate::domain::models::{CryptoCurrency, VoteKind};
use crate::storage::mysql::connection::MySqlConnection;
use crate::storage::queries;
use crate::storage::traits::{CryptoCurrencyStorage, StorageError};

/// MySQL-backed repository for the crypto_vote table
#[derive(Clone)]
pub struct MySqlCryptoCurrencyRepository {
    db: MySqlConnection,
}

impl MySqlCryptoCurrencyRepository {
    pub fn new(db: MySqlConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &MySqlRow) -> Result<CryptoCurrency> {
        Ok(CryptoCurrency {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            up_vote: row.try_get("up_vote")?,
            down_vote: row.try_get("down_vote")?,
        })
    }
}

#[async_trait]
impl CryptoCurrencyStorage for MySqlCryptoCurrencyRepository {
    async fn list(&self) -> Result<Vec<CryptoCurrency>> {
        let rows = sqlx::query(queries::SELECT_ALL)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<CryptoCurrency>> {
        let row = sqlx::query(queries::SELECT_BY_ID)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(queries::COUNT_BY_ID)
            .bind(id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(queries::COUNT_BY_NAME)
            .bind(name)
            .fetch_one(self.db.pool())
            .await?;
        Ok(count > 0)
    }

    async fn insert(&self, name: &str) -> Result<i64> {
        let result = sqlx::query(queries::INSERT)
            .bind(name)
            .execute(self.db.pool())
            .await;

        match result {
            Ok(done) => i64::try_from(done.last_insert_id())
                .context("MySQL returned an id outside the i64 range"),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StorageError::DuplicateName(name.to_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn increment_vote(&self, id: i64, kind: VoteKind) -> Result<bool> {
        let result = sqlx::query(queries::increment_vote(kind))
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(queries::DELETE_BY_ID)
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
