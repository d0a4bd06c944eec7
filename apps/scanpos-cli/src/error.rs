//! # Application Error Type
//!
//! Unified error type for station operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in ScanPOS                                │
//! │                                                                         │
//! │  Operator command / scan / lookup                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  ScannerSession                                                  │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Store error?      ─── DbError::QueryFailed(..)  ──┐            │  │
//! │  │  Validation error? ─── ValidationError::Required ──┼─► AppError │  │
//! │  │  Catalog error?    ─── CatalogError::Timeout     ──┘            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  status line: "[VALIDATION_ERROR] Product name is required"            │
//! │                                                                         │
//! │  No error ends the session. Only startup failures (config, database)   │
//! │  are fatal.                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use scanpos_catalog::CatalogError;
use scanpos_core::{CoreError, RejectReason, ValidationError};
use scanpos_store::DbError;

use crate::config::ConfigError;

/// Error returned from station operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for the status line
    pub message: String,
}

/// Error codes for station operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Cart line or record not found
    NotFound,

    /// Operator input failed validation
    ValidationError,

    /// Snapshot store failed
    DatabaseError,

    /// Catalog request failed
    CatalogError,

    /// Decoder device missing or closed
    DeviceUnavailable,

    /// A lookup is already in flight
    Busy,

    /// Configuration is invalid
    ConfigError,

    /// Command not understood
    UnknownCommand,

    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Wire name, e.g. `VALIDATION_ERROR`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::DeviceUnavailable => "DEVICE_UNAVAILABLE",
            ErrorCode::Busy => "BUSY",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::UnknownCommand => "UNKNOWN_COMMAND",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a busy error.
    pub fn busy() -> Self {
        AppError::new(
            ErrorCode::Busy,
            "A lookup is already in progress. Please wait.",
        )
    }

    /// Creates a device-unavailable error.
    pub fn device_unavailable(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::DeviceUnavailable, message)
    }

    /// Creates an unknown-command error.
    pub fn unknown_command(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::UnknownCommand, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                tracing::error!("Database operation failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidPrice { .. } => AppError::validation(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(format!("Product details are incomplete: {}", err))
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::new(ErrorCode::CatalogError, err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<RejectReason> for AppError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::Busy => AppError::busy(),
            RejectReason::CoolingDown | RejectReason::Duplicate => {
                AppError::new(ErrorCode::Busy, "Scanner is cooling down")
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for station operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AppError::validation("Quantity must be at least 1");
        assert_eq!(
            err.to_string(),
            "[VALIDATION_ERROR] Quantity must be at least 1"
        );
    }

    #[test]
    fn test_from_validation_error() {
        let err: AppError = ValidationError::Required {
            field: "Product name".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            err.message,
            "Product details are incomplete: Product name is required"
        );
    }

    #[test]
    fn test_from_db_error_hides_details() {
        let err: AppError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_serialized_code() {
        let json = serde_json::to_string(&AppError::busy()).unwrap();
        assert!(json.contains("\"code\":\"BUSY\""));
    }
}
