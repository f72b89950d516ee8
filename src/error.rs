use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid mapping source URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Mapping source API error ({status}): {message}")]
    MappingSourceApi { status: StatusCode, message: String },

    #[error("Mapping source schema error: {0}")]
    MappingSchema(#[from] serde_json::Error),

    #[error("Mapping fetch timed out after {0:?}")]
    FetchTimeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    /// Returns an operator-friendly message suitable for printing from the CLI
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::Config(_) => {
                "Configuration problem. Check PROVIDER_MAPPINGS_URL and PROVIDER_MAPPINGS_TIMEOUT_SECS.".to_string()
            }
            ProviderError::InvalidUrl(_) => {
                "The provider mapping URL is not a valid URL.".to_string()
            }
            ProviderError::MappingSourceApi { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    "The mapping service rejected the request. Built-in mappings are in use.".to_string()
                }
                StatusCode::NOT_FOUND => {
                    "The mapping service endpoint was not found. Built-in mappings are in use.".to_string()
                }
                status if status.is_server_error() => {
                    "The mapping service is having problems. Built-in mappings are in use.".to_string()
                }
                _ => {
                    "The mapping service returned an unexpected status. Built-in mappings are in use.".to_string()
                }
            },
            ProviderError::Reqwest(_) | ProviderError::FetchTimeout(_) => {
                "Could not reach the mapping service. Built-in mappings are in use.".to_string()
            }
            ProviderError::MappingSchema(_) => {
                "Could not parse the input or mapping data as JSON.".to_string()
            }
            ProviderError::Io(_) => "Failed to read input or write output.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
