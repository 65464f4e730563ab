//! # discount-core: Gross Price & Discount Entry for Invoice Lines
//!
//! Invoice lines normally hold a single net unit price. This crate lets them
//! be entered as a gross price plus a discount instead, and keeps the three
//! values consistent as any of them is edited.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Host Accounting Application                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Invoice form / importers / sale & commission flows      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ field-change & create hooks            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ discount-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌────────────┐    │   │
//! │  │   │ pricing  │  │   line   │  │  create  │  │ validation │    │   │
//! │  │   │reconcile │  │on_change │  │ prepare  │  │   rules    │    │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - The reconciliation function and discount stacking
//! - [`line`] - Field-change hooks on [`InvoiceLine`]
//! - [`create`] - Creation hook for batches of new lines
//! - [`sources`] - Lines built from sale lines, commissions and credits
//! - [`rounding`] - Bankers Rounding quantization
//! - [`config`] - Precision settings
//! - [`types`] - Line records
//! - [`error`] - Error types
//! - [`validation`] - Field constraints
//!
//! ## Example Usage
//!
//! ```rust
//! use discount_core::{InvoiceLine, NewInvoiceLine, PricingConfig};
//! use rust_decimal::Decimal;
//!
//! let config = PricingConfig::default();
//!
//! // Created from a net price only: gross price is back-computed
//! let mut line = InvoiceLine::create(
//!     NewInvoiceLine {
//!         unit_price: Some(Decimal::new(50, 0)),
//!         ..NewInvoiceLine::default()
//!     },
//!     &config,
//! );
//! assert_eq!(line.gross_unit_price, Some(Decimal::new(50, 0)));
//! assert_eq!(line.discount, Some(Decimal::ZERO));
//!
//! // User then types a 10% discount
//! line.discount = Some(Decimal::new(10, 2));
//! line.on_change_discount(&config);
//! assert_eq!(line.unit_price, Some(Decimal::new(45, 0)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod create;
pub mod error;
pub mod line;
pub mod pricing;
pub mod rounding;
pub mod sources;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{FullDiscountPolicy, PricingConfig};
pub use create::prepare_create;
pub use error::{ConfigError, CoreError, CoreResult, ValidationError};
pub use pricing::{reconcile, Discounts};
pub use sources::SaleLineSource;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default fractional digits of a gross unit price.
pub const DEFAULT_UNIT_PRICE_DIGITS: u32 = 4;

/// Default fractional digits of a discount rate.
pub const DEFAULT_DISCOUNT_DIGITS: u32 = 4;

/// Largest scale a `rust_decimal::Decimal` can hold.
pub const MAX_SCALE: u32 = 28;
