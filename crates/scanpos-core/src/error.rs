//! # Errors
//!
//! Failures raised by the pure layer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Where each error lives                                                 │
//! │                                                                         │
//! │  scanpos-core     CoreError, ValidationError   (this file)             │
//! │  scanpos-store    DbError                      snapshot store          │
//! │  scanpos-catalog  CatalogError                 catalog request         │
//! │  scanpos-cli      AppError                     what the operator sees  │
//! │                                                                         │
//! │  ValidationError ──► CoreError ──► AppError ──► status line            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages carry the offending value (barcode, price text, field) so the
//! status line can show them without extra context.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// A rule of the cart or money layer was broken.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A price string could not be read as a decimal amount.
    ///
    /// ## When This Occurs
    /// - Catalog returns a price like `"abc"` or `"1e3"`
    /// - Operator types a malformed price into the draft
    #[error("Invalid price '{input}': {reason}")]
    InvalidPrice { input: String, reason: String },

    /// A draft or catalog field was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// One field of a cart line failed its check.
///
/// `field` is the field name as the operator knows it: `barcode`, `name`,
/// `price` or `quantity`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty after trimming.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Zero or below where at least one is needed.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Control characters in a barcode, negative price text, etc.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_price_message() {
        let err = CoreError::InvalidPrice {
            input: "abc".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid price 'abc': not a number");
    }

    #[test]
    fn test_validation_messages_name_the_field() {
        let err = ValidationError::Required {
            field: "barcode".to_string(),
        };
        assert_eq!(err.to_string(), "barcode is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_wraps_into_core_error() {
        let err: CoreError = ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 64,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Validation error: barcode must be at most 64 characters"
        );
    }
}
