//! # Domain Types
//!
//! Invoice line records exchanged with the host application.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌──────────────────────┐                   │
//! │  │    InvoiceLine       │   │   NewInvoiceLine     │                   │
//! │  │  ──────────────────  │   │  ──────────────────  │                   │
//! │  │  id (UUID)           │   │  field-value mapping │                   │
//! │  │  line_type           │   │  handed to create    │                   │
//! │  │  quantity            │   │  (everything Option) │                   │
//! │  │  unit_price (net)    │   └──────────────────────┘                   │
//! │  │  gross_unit_price    │                                              │
//! │  │  discount            │   ┌──────────────────────┐                   │
//! │  │  invoice_discount    │   │     LinePrices       │                   │
//! │  └──────────────────────┘   │  what a hook returns │                   │
//! │                             └──────────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All decimals serialize as strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pricing::Discounts;

// =============================================================================
// Line Type
// =============================================================================

/// Kind of invoice line. Only `Line` carries prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceLineType {
    /// A priced product or service line.
    #[default]
    Line,
    Subtotal,
    Title,
    Comment,
}

impl InvoiceLineType {
    #[inline]
    pub const fn is_priced(&self) -> bool {
        matches!(self, InvoiceLineType::Line)
    }
}

// =============================================================================
// Line Prices
// =============================================================================

/// The three price fields reconciliation writes back to a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LinePrices {
    /// Net unit price actually invoiced.
    #[ts(as = "Option<String>")]
    pub unit_price: Option<Decimal>,

    /// Pre-discount unit price, rounded to the gross precision.
    #[ts(as = "Option<String>")]
    pub gross_unit_price: Option<Decimal>,

    /// Pre-discount unit price at net precision.
    #[ts(as = "Option<String>")]
    pub gross_unit_price_unrounded: Option<Decimal>,
}

// =============================================================================
// Invoice Line
// =============================================================================

/// One invoice line as edited in the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceLine {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub line_type: InvoiceLineType,

    /// Negative on credit lines.
    #[ts(as = "String")]
    pub quantity: Decimal,

    #[ts(as = "Option<String>")]
    pub unit_price: Option<Decimal>,

    #[ts(as = "Option<String>")]
    pub gross_unit_price: Option<Decimal>,

    /// Read-only for users; written by reconciliation.
    #[ts(as = "Option<String>")]
    pub gross_unit_price_unrounded: Option<Decimal>,

    /// Line discount, 0.1 = 10%.
    #[ts(as = "Option<String>")]
    pub discount: Option<Decimal>,

    /// Invoice-wide discount stacked on the line discount.
    #[ts(as = "Option<String>")]
    pub invoice_discount: Option<Decimal>,
}

impl InvoiceLine {
    /// Current price fields as a [`LinePrices`].
    #[inline]
    pub fn prices(&self) -> LinePrices {
        LinePrices {
            unit_price: self.unit_price,
            gross_unit_price: self.gross_unit_price,
            gross_unit_price_unrounded: self.gross_unit_price_unrounded,
        }
    }

    /// Current discount rates.
    #[inline]
    pub fn discounts(&self) -> Discounts {
        Discounts::new(self.discount, self.invoice_discount)
    }

    /// Writes reconciled prices back in place.
    pub fn apply_prices(&mut self, prices: LinePrices) {
        self.unit_price = prices.unit_price;
        self.gross_unit_price = prices.gross_unit_price;
        self.gross_unit_price_unrounded = prices.gross_unit_price_unrounded;
    }
}

// =============================================================================
// New Invoice Line
// =============================================================================

/// Field values for a line about to be created.
///
/// Any field may be missing; the creation hook fills in what it can derive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct NewInvoiceLine {
    pub line_type: InvoiceLineType,

    #[ts(as = "Option<String>")]
    pub quantity: Option<Decimal>,

    #[ts(as = "Option<String>")]
    pub unit_price: Option<Decimal>,

    #[ts(as = "Option<String>")]
    pub gross_unit_price: Option<Decimal>,

    #[ts(as = "Option<String>")]
    pub gross_unit_price_unrounded: Option<Decimal>,

    #[ts(as = "Option<String>")]
    pub discount: Option<Decimal>,

    #[ts(as = "Option<String>")]
    pub invoice_discount: Option<Decimal>,
}

impl NewInvoiceLine {
    #[inline]
    pub fn discounts(&self) -> Discounts {
        Discounts::new(self.discount, self.invoice_discount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
