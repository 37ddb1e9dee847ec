//! Cryptocurrency service domain logic.
//!
//! Validation of new records, the shared vote routine, lookups and deletion.
//! Mutations rely on the affected-row count of the mutating statement itself
//! to detect a missing id, so there is no separate existence query racing the
//! update or delete.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::commands::CreateCryptoCurrencyCommand;
use crate::domain::errors::{CryptoVoteError, CryptoVoteResult};
use crate::domain::models::{CryptoCurrency, VoteKind};
use crate::domain::validation::validate_name;
use crate::storage::{CryptoCurrencyStorage, StorageError};

/// Service for managing cryptocurrencies and their votes
#[derive(Clone)]
pub struct CryptoCurrencyService {
    repository: Arc<dyn CryptoCurrencyStorage>,
}

impl CryptoCurrencyService {
    pub fn new(repository: Arc<dyn CryptoCurrencyStorage>) -> Self {
        Self { repository }
    }

    /// List every record
    pub async fn get_all(&self) -> CryptoVoteResult<Vec<CryptoCurrency>> {
        let cryptos = self.repository.list().await?;
        info!("Found {} cryptocurrencies", cryptos.len());
        Ok(cryptos)
    }

    pub async fn get_by_id(&self, id: i64) -> CryptoVoteResult<CryptoCurrency> {
        match self.repository.get_by_id(id).await? {
            Some(crypto) => Ok(crypto),
            None => {
                warn!("Cryptocurrency not found: {}", id);
                Err(CryptoVoteError::NotFound(id))
            }
        }
    }

    /// Create a new cryptocurrency with both counters at zero
    pub async fn create(
        &self,
        command: CreateCryptoCurrencyCommand,
    ) -> CryptoVoteResult<CryptoCurrency> {
        let name = command.name;
        validate_name(&name)?;

        if self.repository.exists_by_name(&name).await? {
            warn!("Cryptocurrency name already taken: {}", name);
            return Err(CryptoVoteError::Conflict(name));
        }

        // A concurrent create can still win between the check and the insert;
        // the unique key catches that case.
        let id = match self.repository.insert(&name).await {
            Ok(id) => id,
            Err(e) => {
                return match e.downcast_ref::<StorageError>() {
                    Some(StorageError::DuplicateName(_)) => {
                        warn!("Cryptocurrency name already taken: {}", name);
                        Err(CryptoVoteError::Conflict(name))
                    }
                    None => Err(e.into()),
                };
            }
        };

        info!("Created cryptocurrency: {} with ID: {}", name, id);
        Ok(CryptoCurrency::new(id, name))
    }

    pub async fn apply_up_vote(&self, id: i64) -> CryptoVoteResult<CryptoCurrency> {
        self.apply_vote(id, VoteKind::UpVote).await
    }

    pub async fn apply_down_vote(&self, id: i64) -> CryptoVoteResult<CryptoCurrency> {
        self.apply_vote(id, VoteKind::DownVote).await
    }

    /// Add exactly one vote of `kind` and return the updated record
    pub async fn apply_vote(&self, id: i64, kind: VoteKind) -> CryptoVoteResult<CryptoCurrency> {
        if !self.repository.increment_vote(id, kind).await? {
            warn!("Cannot {} missing cryptocurrency: {}", kind, id);
            return Err(CryptoVoteError::NotFound(id));
        }

        // The row can be deleted between the increment and this read
        let crypto = self.get_by_id(id).await?;
        info!(
            "Recorded {} for {} (up: {}, down: {})",
            kind, crypto.name, crypto.up_vote, crypto.down_vote
        );
        Ok(crypto)
    }

    pub async fn delete(&self, id: i64) -> CryptoVoteResult<()> {
        if !self.repository.delete(id).await? {
            warn!("Cannot delete missing cryptocurrency: {}", id);
            return Err(CryptoVoteError::NotFound(id));
        }

        info!("Deleted cryptocurrency with ID: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::NameValidationError;
    use crate::storage::{SqliteConnection, SqliteCryptoCurrencyRepository};
    use anyhow::anyhow;
    use async_trait::async_trait;

    async fn create_test_service() -> CryptoCurrencyService {
        let db = SqliteConnection::init_test()
            .await
            .expect("Failed to init test DB");
        CryptoCurrencyService::new(Arc::new(SqliteCryptoCurrencyRepository::new(db)))
    }

    fn command(name: &str) -> CreateCryptoCurrencyCommand {
        CreateCryptoCurrencyCommand {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_starts_with_zero_votes() {
        let service = create_test_service().await;

        let crypto = service.create(command("Bitcoin")).await.unwrap();
        assert_eq!(crypto.id, 1);
        assert_eq!(crypto.name, "Bitcoin");
        assert_eq!(crypto.up_vote, 0);
        assert_eq!(crypto.down_vote, 0);
        assert_eq!(crypto.total_votes(), 0);

        assert_eq!(service.get_by_id(crypto.id).await.unwrap(), crypto);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let service = create_test_service().await;

        let err = service.create(command("")).await.unwrap_err();
        assert!(matches!(
            err,
            CryptoVoteError::InvalidName(NameValidationError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_numeric_name() {
        let service = create_test_service().await;

        let err = service.create(command("123")).await.unwrap_err();
        assert!(matches!(
            err,
            CryptoVoteError::InvalidName(NameValidationError::Numeric)
        ));
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts() {
        let service = create_test_service().await;

        service.create(command("Bitcoin")).await.unwrap();
        let err = service.create(command("Bitcoin")).await.unwrap_err();
        assert!(matches!(err, CryptoVoteError::Conflict(name) if name == "Bitcoin"));

        // Different case is a different name
        service.create(command("bitcoin")).await.unwrap();
        assert_eq!(service.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_votes_increment_by_one_and_total_tracks_sum() {
        let service = create_test_service().await;
        let id = service.create(command("Ether")).await.unwrap().id;

        let after_up = service.apply_up_vote(id).await.unwrap();
        assert_eq!((after_up.up_vote, after_up.down_vote), (1, 0));
        assert_eq!(after_up.total_votes(), 1);

        let after_down = service.apply_down_vote(id).await.unwrap();
        assert_eq!((after_down.up_vote, after_down.down_vote), (1, 1));
        assert_eq!(after_down.total_votes(), 2);

        for expected in 2..=5 {
            let crypto = service.apply_vote(id, VoteKind::UpVote).await.unwrap();
            assert_eq!(crypto.up_vote, expected);
            assert_eq!(crypto.down_vote, 1);
            assert_eq!(crypto.total_votes(), crypto.up_vote + crypto.down_vote);
        }
    }

    #[tokio::test]
    async fn test_missing_id_is_always_not_found() {
        let service = create_test_service().await;

        assert!(matches!(
            service.get_by_id(7).await,
            Err(CryptoVoteError::NotFound(7))
        ));
        assert!(matches!(
            service.apply_up_vote(7).await,
            Err(CryptoVoteError::NotFound(7))
        ));
        assert!(matches!(
            service.apply_down_vote(7).await,
            Err(CryptoVoteError::NotFound(7))
        ));
        assert!(matches!(
            service.delete(7).await,
            Err(CryptoVoteError::NotFound(7))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = create_test_service().await;
        let id = service.create(command("Solana")).await.unwrap().id;

        service.delete(id).await.unwrap();
        assert!(matches!(
            service.get_by_id(id).await,
            Err(CryptoVoteError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(id).await,
            Err(CryptoVoteError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_votes_are_not_lost() {
        let service = create_test_service().await;
        let id = service.create(command("Dogecoin")).await.unwrap().id;

        let mut handles = Vec::new();
        for i in 0..20 {
            let service = service.clone();
            let kind = if i % 2 == 0 {
                VoteKind::UpVote
            } else {
                VoteKind::DownVote
            };
            handles.push(tokio::spawn(async move {
                service.apply_vote(id, kind).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let crypto = service.get_by_id(id).await.unwrap();
        assert_eq!(crypto.up_vote, 10);
        assert_eq!(crypto.down_vote, 10);
        assert_eq!(crypto.total_votes(), 20);
    }

    /// Storage stub whose every query fails
    struct FailingStorage;

    #[async_trait]
    impl CryptoCurrencyStorage for FailingStorage {
        async fn list(&self) -> anyhow::Result<Vec<CryptoCurrency>> {
            Err(anyhow!("connection refused"))
        }
        async fn get_by_id(&self, _id: i64) -> anyhow::Result<Option<CryptoCurrency>> {
            Err(anyhow!("connection refused"))
        }
        async fn exists_by_id(&self, _id: i64) -> anyhow::Result<bool> {
            Err(anyhow!("connection refused"))
        }
        async fn exists_by_name(&self, _name: &str) -> anyhow::Result<bool> {
            Err(anyhow!("connection refused"))
        }
        async fn insert(&self, _name: &str) -> anyhow::Result<i64> {
            Err(anyhow!("connection refused"))
        }
        async fn increment_vote(&self, _id: i64, _kind: VoteKind) -> anyhow::Result<bool> {
            Err(anyhow!("connection refused"))
        }
        async fn delete(&self, _id: i64) -> anyhow::Result<bool> {
            Err(anyhow!("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_storage_failures_surface_as_storage_errors() {
        let service = CryptoCurrencyService::new(Arc::new(FailingStorage));

        assert!(matches!(
            service.get_all().await,
            Err(CryptoVoteError::Storage(_))
        ));
        assert!(matches!(
            service.create(command("Bitcoin")).await,
            Err(CryptoVoteError::Storage(_))
        ));
        assert!(matches!(
            service.apply_up_vote(1).await,
            Err(CryptoVoteError::Storage(_))
        ));
        assert!(matches!(
            service.delete(1).await,
            Err(CryptoVoteError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_validation_runs_before_storage() {
        let service = CryptoCurrencyService::new(Arc::new(FailingStorage));

        assert!(matches!(
            service.create(command("")).await,
            Err(CryptoVoteError::InvalidName(NameValidationError::Empty))
        ));
    }
}
