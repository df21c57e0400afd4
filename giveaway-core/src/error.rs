use thiserror::Error;

use crate::models::GiveawayId;

/// Failure of a single remote fetch. Stored on the resource it belongs to,
/// so it has to be cheap to clone and compare.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("giveaway {0} not found")]
    NotFound(GiveawayId),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::InvalidResponse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::InvalidResponse(err.to_string())
    }
}

/// A filter value outside the catalog's enumerated domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown sort order `{0}` (expected date, value or popularity)")]
    UnknownSortBy(String),
    #[error("unknown platform `{0}`")]
    UnknownPlatform(String),
    #[error("unknown giveaway type `{0}`")]
    UnknownType(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}
