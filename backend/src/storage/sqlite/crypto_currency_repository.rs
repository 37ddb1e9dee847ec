use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{CryptoCurrency, VoteKind};
use crate::storage::queries;
use crate::storage::sqlite::connection::SqliteConnection;
use crate::storage::traits::{CryptoCurrencyStorage, StorageError};

/// SQLite-backed repository for the crypto_vote table
#[derive(Clone)]
pub struct SqliteCryptoCurrencyRepository {
    db: SqliteConnection,
}

impl SqliteCryptoCurrencyRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<CryptoCurrency> {
        Ok(CryptoCurrency {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            up_vote: row.try_get("up_vote")?,
            down_vote: row.try_get("down_vote")?,
        })
    }
}

#[async_trait]
impl CryptoCurrencyStorage for SqliteCryptoCurrencyRepository {
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
            Ok(done) => Ok(done.last_insert_rowid()),
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

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> SqliteCryptoCurrencyRepository {
        let db = SqliteConnection::init_test()
            .await
            .expect("Failed to create test database");
        SqliteCryptoCurrencyRepository::new(db)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = setup_test().await;

        let id = repo.insert("Bitcoin").await.expect("Failed to insert");
        assert_eq!(id, 1);

        let stored = repo.get_by_id(id).await.expect("Query failed").unwrap();
        assert_eq!(stored, CryptoCurrency::new(1, "Bitcoin".to_string()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let repo = setup_test().await;

        let result = repo.get_by_id(42).await.expect("Query failed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_reports_duplicate_name() {
        let repo = setup_test().await;
        repo.insert("Bitcoin").await.expect("Failed to insert");

        let err = repo.insert("Bitcoin").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::DuplicateName(name)) if name == "Bitcoin"
        ));
    }

    #[tokio::test]
    async fn test_exists_by_name_is_case_sensitive() {
        let repo = setup_test().await;
        repo.insert("Bitcoin").await.expect("Failed to insert");

        assert!(repo.exists_by_name("Bitcoin").await.unwrap());
        assert!(!repo.exists_by_name("bitcoin").await.unwrap());
        assert!(!repo.exists_by_name("BITCOIN").await.unwrap());

        // Case variants are distinct names
        repo.insert("bitcoin").await.expect("Case variant should insert");
    }

    #[tokio::test]
    async fn test_exists_by_id() {
        let repo = setup_test().await;
        let id = repo.insert("Ether").await.unwrap();

        assert!(repo.exists_by_id(id).await.unwrap());
        assert!(!repo.exists_by_id(id + 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_increment_vote_touches_one_counter() {
        let repo = setup_test().await;
        let id = repo.insert("Dogecoin").await.unwrap();

        assert!(repo.increment_vote(id, VoteKind::UpVote).await.unwrap());
        assert!(repo.increment_vote(id, VoteKind::UpVote).await.unwrap());
        assert!(repo.increment_vote(id, VoteKind::DownVote).await.unwrap());

        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.up_vote, 2);
        assert_eq!(stored.down_vote, 1);
        assert_eq!(stored.total_votes(), 3);
    }

    #[tokio::test]
    async fn test_increment_vote_missing_row() {
        let repo = setup_test().await;

        assert!(!repo.increment_vote(99, VoteKind::UpVote).await.unwrap());
        assert!(!repo.increment_vote(99, VoteKind::DownVote).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup_test().await;
        let id = repo.insert("Solana").await.unwrap();

        assert!(repo.delete(id).await.unwrap(), "Row should have been deleted");
        assert!(repo.get_by_id(id).await.unwrap().is_none());
        assert!(!repo.delete(id).await.unwrap(), "Second delete finds nothing");
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = setup_test().await;
        assert!(repo.list().await.unwrap().is_empty());

        for name in ["Zcash", "Algorand", "Monero"] {
            repo.insert(name).await.unwrap();
        }

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Zcash", "Algorand", "Monero"]);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = setup_test().await;
        let first = repo.insert("Cardano").await.unwrap();
        repo.delete(first).await.unwrap();

        let second = repo.insert("Cardano").await.unwrap();
        assert!(second > first);
    }
}
