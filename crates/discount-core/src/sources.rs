//! # Line Sources
//!
//! Invoice lines produced from other documents keep their gross price and
//! discount instead of collapsing to a bare net price.
//!
//! ```text
//! Sale line ───────► base price + discount rate ─► reconciled line
//! Commission ──────► unit price, no discount ────► gross = net
//! Existing line ───► credit() ───────────────────► same prices, -quantity
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::PricingConfig;
use crate::types::{InvoiceLine, InvoiceLineType};

/// The parts of a sale order line an invoice line is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLineSource {
    pub quantity: Decimal,

    /// Net unit price agreed on the sale.
    pub unit_price: Option<Decimal>,

    /// List price before the sale discount.
    pub base_price: Option<Decimal>,

    /// Sale discount, 0.1 = 10%.
    pub discount_rate: Option<Decimal>,
}

impl InvoiceLine {
    /// Invoice line for a sale order line.
    ///
    /// A missing or zero sale discount becomes an explicit 0.
    pub fn from_sale_line(sale: &SaleLineSource, config: &PricingConfig) -> InvoiceLine {
        let discount = match sale.discount_rate {
            Some(rate) if !rate.is_zero() => rate,
            _ => Decimal::ZERO,
        };

        let mut line = InvoiceLine {
            id: Uuid::new_v4().to_string(),
            line_type: InvoiceLineType::Line,
            quantity: sale.quantity,
            unit_price: sale.unit_price,
            gross_unit_price: sale.base_price,
            gross_unit_price_unrounded: None,
            discount: Some(discount),
            invoice_discount: None,
        };
        line.update_prices(config);

        debug!(id = %line.id, gross = ?line.gross_unit_price, discount = %discount, "Invoice line from sale line");
        line
    }

    /// Invoice line paying out a commission. Commissions carry no discount.
    pub fn from_commission(unit_price: Decimal, quantity: Decimal) -> InvoiceLine {
        InvoiceLine {
            id: Uuid::new_v4().to_string(),
            line_type: InvoiceLineType::Line,
            quantity,
            unit_price: Some(unit_price),
            gross_unit_price: Some(unit_price),
            gross_unit_price_unrounded: Some(unit_price),
            discount: Some(Decimal::ZERO),
            invoice_discount: None,
        }
    }

    /// Credit note line reversing this one.
    ///
    /// Prices and both discounts are copied as they are; only the quantity
    /// flips, so the credit nets out the line it reverses.
    pub fn credit(&self) -> InvoiceLine {
        InvoiceLine {
            id: Uuid::new_v4().to_string(),
            line_type: self.line_type,
            quantity: -self.quantity,
            unit_price: self.unit_price,
            gross_unit_price: self.gross_unit_price,
            gross_unit_price_unrounded: self.gross_unit_price_unrounded,
            discount: self.discount,
            invoice_discount: self.invoice_discount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
