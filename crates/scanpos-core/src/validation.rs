//! # Validation Module
//!
//! Input validation for cart lines and drafts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command parsing (scanpos-cli)                                │
//! │  └── Typed arguments: quantities are integers, prices decimals         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Required fields, positive quantity, non-negative price            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CartLedger                                                   │
//! │  └── One line per barcode                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LineDraft;
use crate::{MAX_BARCODE_LEN, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A draft that passed validation, with the price resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLine {
    pub barcode: String,
    pub name: String,
    pub price: Money,
    pub quantity: i64,
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a barcode as read from a decoder or typed by the operator.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most `MAX_BARCODE_LEN` characters
/// - No control characters
///
/// ## Returns
/// The trimmed barcode.
///
/// ## Example
/// ```rust
/// use scanpos_core::validation::validate_barcode;
///
/// assert_eq!(validate_barcode(" 4760001 ").unwrap(), "4760001");
/// assert!(validate_barcode("").is_err());
/// ```
pub fn validate_barcode(barcode: &str) -> ValidationResult<String> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.chars().count() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    if barcode.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(barcode.to_string())
}

/// Validates a product name. Empty (after trimming) is rejected.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - At least 1
/// - At most `MAX_ITEM_QUANTITY` (999); larger values are almost always a
///   barcode typed into the quantity field
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be present
/// - Must be non-negative (zero is allowed: free items)
pub fn validate_price(price: Option<Money>) -> ValidationResult<Money> {
    let price = price.ok_or_else(|| ValidationError::Required {
        field: "price".to_string(),
    })?;

    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(price)
}

// =============================================================================
// Draft Validator
// =============================================================================

/// Validates a full draft in field order: barcode, name, price, quantity.
///
/// The first failing field is reported.
pub fn validate_draft(draft: &LineDraft) -> ValidationResult<ValidLine> {
    let barcode = validate_barcode(&draft.barcode)?;
    validate_product_name(&draft.name)?;
    let price = validate_price(draft.price)?;
    validate_quantity(draft.quantity)?;

    Ok(ValidLine {
        barcode,
        name: draft.name.trim().to_string(),
        price,
        quantity: draft.quantity,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(barcode: &str, name: &str, price: Option<i64>, quantity: i64) -> LineDraft {
        LineDraft {
            barcode: barcode.to_string(),
            name: name.to_string(),
            price: price.map(Money::from_cents),
            quantity,
        }
    }

    #[test]
    fn test_validate_barcode() {
        assert_eq!(validate_barcode("123").unwrap(), "123");
        assert_eq!(validate_barcode("  4760001\n").unwrap(), "4760001");

        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("   ").is_err());
        assert!(validate_barcode("12\u{7}3").is_err());
        assert!(validate_barcode(&"9".repeat(MAX_BARCODE_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(250).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert_eq!(
            validate_quantity(MAX_ITEM_QUANTITY + 1).unwrap_err(),
            ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_ITEM_QUANTITY
            }
        );
        assert!(validate_quantity(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(Some(Money::zero())).unwrap(), Money::zero());
        assert!(validate_price(Some(Money::from_cents(150))).is_ok());
        assert!(validate_price(None).is_err());
        assert!(validate_price(Some(Money::from_cents(-1))).is_err());
    }

    #[test]
    fn test_validate_draft_reports_first_missing_field() {
        assert_eq!(
            validate_draft(&draft("", "", None, 1)).unwrap_err(),
            ValidationError::Required {
                field: "barcode".to_string()
            }
        );
        assert_eq!(
            validate_draft(&draft("123", " ", None, 1)).unwrap_err(),
            ValidationError::Required {
                field: "name".to_string()
            }
        );
        assert_eq!(
            validate_draft(&draft("123", "Water", None, 1)).unwrap_err(),
            ValidationError::Required {
                field: "price".to_string()
            }
        );
        assert!(validate_draft(&draft("123", "Water", Some(150), 0)).is_err());
    }

    #[test]
    fn test_validate_draft_trims() {
        let valid = validate_draft(&draft(" 123 ", " Water ", Some(150), 2)).unwrap();
        assert_eq!(valid.barcode, "123");
        assert_eq!(valid.name, "Water");
        assert_eq!(valid.price.cents(), 150);
        assert_eq!(valid.quantity, 2);
    }
}
