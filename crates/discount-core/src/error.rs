//! # Error Types
//!
//! Domain-specific error types for discount-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  discount-core errors (this file)                                      │
//! │  ├── CoreError        - Umbrella error for callers                     │
//! │  ├── ConfigError      - Precision settings from the environment        │
//! │  └── ValidationError  - Field constraint failures                      │
//! │                                                                         │
//! │  NOT an error: discount = 100%                                         │
//! │  └── Reconciliation degrades to a fallback value, never fails          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for everything in this crate that can fail.
///
/// Price reconciliation itself is infallible; only loading configuration and
/// checking field constraints produce errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error (wraps ConfigError).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading [`PricingConfig`](crate::config::PricingConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable present but not parseable.
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    /// Combined precision exceeds what the decimal type can hold.
    ///
    /// ## When This Occurs
    /// The net unit price is stored with `unit_price_digits + discount_digits`
    /// fractional digits, and a decimal holds at most 28.
    #[error("unit price digits ({unit_price_digits}) + discount digits ({discount_digits}) exceed {max}")]
    PrecisionTooLarge {
        unit_price_digits: u32,
        discount_digits: u32,
        max: u32,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field constraint errors.
///
/// The host runs these checks before storing a line; reconciliation never
/// calls them.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Rate lies outside the closed interval [0, 1].
    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: String, value: Decimal },

    /// Value must not be negative.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: Decimal },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
