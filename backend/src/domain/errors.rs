use thiserror::Error;

/// Reasons a proposed cryptocurrency name is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameValidationError {
    #[error("Name cannot be empty")]
    Empty,
    #[error("Name cannot be a number")]
    Numeric,
}

#[derive(Debug, Error)]
pub enum CryptoVoteError {
    #[error(transparent)]
    InvalidName(#[from] NameValidationError),

    #[error("Cryptocurrency {0} does not exist")]
    NotFound(i64),

    #[error("Cryptocurrency with name '{0}' already exists")]
    Conflict(String),

    #[error("Storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type CryptoVoteResult<T> = Result<T, CryptoVoteError>;
