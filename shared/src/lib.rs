use serde::{Deserialize, Serialize};

/// A cryptocurrency and its vote tallies as exposed over the REST API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoCurrency {
    /// Storage-assigned identifier
    pub id: i64,
    /// Unique, case-sensitive name
    pub name: String,
    pub up_vote: i64,
    pub down_vote: i64,
    /// Always `up_vote + down_vote`
    pub total_votes: i64,
}

/// Payload for POST /cryptovote
///
/// Any vote fields a client sends are ignored; new records always start at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCryptoCurrencyRequest {
    #[serde(default)]
    pub name: String,
}

/// Body returned for every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
