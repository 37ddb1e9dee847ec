use anyhow::{Context, Result};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::sync::Arc;
use tracing::info;

/// MySqlConnection manages the MySQL pool and table bootstrap
#[derive(Clone)]
pub struct MySqlConnection {
    pool: Arc<MySqlPool>,
}

impl MySqlConnection {
    /// Connect to MySQL and make sure the crypto_vote table exists
    pub async fn connect(options: MySqlConnectOptions) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .connect_with(options)
            .await
            .context("Failed to connect to MySQL")?;

        Self::setup_schema(&pool).await?;
        info!("MySQL storage ready");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn setup_schema(pool: &MySqlPool) -> Result<()> {
        // utf8mb4_bin keeps name comparisons and the unique key case-sensitive
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS crypto_vote (
                id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
                up_vote BIGINT NOT NULL DEFAULT 0,
                down_vote BIGINT NOT NULL DEFAULT 0,
                UNIQUE KEY uq_crypto_vote_name (name)
            )
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create crypto_vote table")?;

        Ok(())
    }

    /// Get the underlying MySQL pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}
