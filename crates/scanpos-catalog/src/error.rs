//! # Catalog Error Types
//!
//! Errors raised while talking to the catalog service.
//!
//! None of these reach the debouncer as a failure: the lookup layer folds
//! every error into a `NotFound` outcome carrying the message.

use thiserror::Error;

/// Catalog client errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog URL is malformed or not http/https.
    #[error("Invalid catalog URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    /// Request could not be sent or the body could not be read.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request exceeded the configured timeout.
    #[error("Catalog request timed out")]
    Timeout,

    /// Server answered with a non-success status.
    #[error("Catalog returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// Body was not valid JSON.
    #[error("Malformed catalog response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else if let Some(status) = err.status() {
            CatalogError::HttpStatus {
                status: status.as_u16(),
            }
        } else {
            CatalogError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Malformed(err.to_string())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CatalogError::HttpStatus { status: 503 }.to_string(),
            "Catalog returned HTTP 503"
        );
        assert_eq!(
            CatalogError::Timeout.to_string(),
            "Catalog request timed out"
        );
    }

    #[test]
    fn test_json_error_maps_to_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(CatalogError::from(err), CatalogError::Malformed(_)));
    }
}
