//! # Validation Module
//!
//! Field constraints for invoice lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Host form                                                    │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Field-change hooks (line.rs)                                 │
//! │  └── NO validation: reconcile whatever was typed, never fail           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Before save (THIS MODULE)                                    │
//! │  ├── discount within [0, 1]                                            │
//! │  ├── prices not negative                                               │
//! │  └── id is a UUID                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use discount_core::validation::validate_discount;
//! use rust_decimal::Decimal;
//!
//! assert!(validate_discount("discount", Some(Decimal::new(10, 2))).is_ok());
//! assert!(validate_discount("discount", Some(Decimal::new(15, 1))).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::InvoiceLine;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a discount rate.
///
/// ## Rules
/// - Absent is fine
/// - Must lie in [0, 1]; 1 (100%) is allowed
pub fn validate_discount(field: &str, rate: Option<Decimal>) -> ValidationResult<()> {
    match rate {
        Some(value) if value < Decimal::ZERO || value > Decimal::ONE => {
            Err(ValidationError::RateOutOfRange {
                field: field.to_string(),
                value,
            })
        }
        _ => Ok(()),
    }
}

/// Validates a price.
///
/// ## Rules
/// - Absent is fine
/// - Zero is allowed (free items)
/// - Negative is rejected; credits negate the quantity, not the price
pub fn validate_price(field: &str, price: Option<Decimal>) -> ValidationResult<()> {
    match price {
        Some(value) if value < Decimal::ZERO => Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a line id.
///
/// ## Example
/// ```rust
/// use discount_core::validation::validate_line_id;
///
/// assert!(validate_line_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_line_id("not-a-uuid").is_err());
/// ```
pub fn validate_line_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Runs every field check on a line, stopping at the first failure.
pub fn validate_line(line: &InvoiceLine) -> ValidationResult<()> {
    validate_line_id(&line.id)?;

    if !line.line_type.is_priced() {
        return Ok(());
    }

    validate_price("unit_price", line.unit_price)?;
    validate_price("gross_unit_price", line.gross_unit_price)?;
    validate_discount("discount", line.discount)?;
    validate_discount("invoice_discount", line.invoice_discount)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvoiceLineType;
    use rust_decimal_macros::dec;

    fn line() -> InvoiceLine {
        InvoiceLine {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            line_type: InvoiceLineType::Line,
            quantity: dec!(1),
            unit_price: Some(dec!(90)),
            gross_unit_price: Some(dec!(100)),
            gross_unit_price_unrounded: Some(dec!(100)),
            discount: Some(dec!(0.1)),
            invoice_discount: None,
        }
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount("discount", None).is_ok());
        assert!(validate_discount("discount", Some(dec!(0))).is_ok());
        assert!(validate_discount("discount", Some(dec!(0.25))).is_ok());
        assert!(validate_discount("discount", Some(dec!(1))).is_ok());

        assert!(validate_discount("discount", Some(dec!(-0.01))).is_err());
        assert!(validate_discount("discount", Some(dec!(1.0001))).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("unit_price", None).is_ok());
        assert!(validate_price("unit_price", Some(dec!(0))).is_ok());
        assert!(validate_price("unit_price", Some(dec!(10.99))).is_ok());
        assert!(validate_price("unit_price", Some(dec!(-1))).is_err());
    }

    #[test]
    fn test_validate_line_id() {
        assert!(validate_line_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_line_id("").is_err());
        assert!(validate_line_id("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_line() {
        assert!(validate_line(&line()).is_ok());

        let mut bad = line();
        bad.invoice_discount = Some(dec!(2));
        let err = validate_line(&bad).unwrap_err();
        assert!(matches!(err, ValidationError::RateOutOfRange { ref field, .. } if field == "invoice_discount"));

        let mut comment = line();
        comment.line_type = InvoiceLineType::Comment;
        comment.discount = Some(dec!(5));
        assert!(validate_line(&comment).is_ok());
    }
}
