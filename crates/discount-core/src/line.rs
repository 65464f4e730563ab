//! # Field-Change Hooks
//!
//! Call sites the host's event system invokes when a user edits a line.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Invoice form: edit line                                                │
//! │                                                                         │
//! │  User types gross price 100, discount 0.10                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  on_change_discount() ← host event                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reconcile() → unit_price 90, gross 100                                │
//! │       │                                                                 │
//! │       ├── applied to the line in place                                 │
//! │       └── returned as LinePrices for the form to redraw                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines that are not of type `line` carry no prices; every hook leaves them
//! alone and returns their current values.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PricingConfig;
use crate::pricing::reconcile;
use crate::rounding::quantize_opt;
use crate::types::{InvoiceLine, LinePrices};

impl InvoiceLine {
    /// Recomputes the price fields from the line's current values and
    /// writes them back.
    ///
    /// Both discount rates are first rounded to the configured discount
    /// digits, so the stored rate is the one the prices were derived from.
    pub fn update_prices(&mut self, config: &PricingConfig) -> LinePrices {
        if !self.line_type.is_priced() {
            return self.prices();
        }

        self.discount = quantize_opt(self.discount, config.discount_scale());
        self.invoice_discount = quantize_opt(self.invoice_discount, config.discount_scale());

        let prices = reconcile(self.prices(), self.discounts(), config);
        self.apply_prices(prices);
        prices
    }

    pub fn on_change_gross_unit_price(&mut self, config: &PricingConfig) -> LinePrices {
        self.update_prices(config)
    }

    pub fn on_change_discount(&mut self, config: &PricingConfig) -> LinePrices {
        self.update_prices(config)
    }

    pub fn on_change_invoice_discount(&mut self, config: &PricingConfig) -> LinePrices {
        self.update_prices(config)
    }

    /// Net price edited directly.
    ///
    /// The gross price is cleared first so it is back-computed from the new
    /// net price instead of overwriting it.
    pub fn on_change_unit_price(&mut self, config: &PricingConfig) -> LinePrices {
        if self.line_type.is_priced() && self.discounts().is_present() {
            self.gross_unit_price = None;
            self.gross_unit_price_unrounded = None;
        }
        self.update_prices(config)
    }

    /// A product was picked and the host looked up its unit price.
    ///
    /// The looked-up price becomes the gross price and the line discount is
    /// reset. `None` means the lookup produced no price, leaving the prices
    /// and any discount already entered alone; only an absent discount
    /// becomes 0.
    pub fn on_change_product(
        &mut self,
        product_unit_price: Option<Decimal>,
        config: &PricingConfig,
    ) -> LinePrices {
        if !self.line_type.is_priced() {
            return self.prices();
        }

        let prices = match product_unit_price {
            Some(price) => {
                debug!(id = %self.id, price = %price, "Product price becomes gross price");
                self.gross_unit_price = Some(price);
                self.discount = Some(Decimal::ZERO);
                self.update_prices(config)
            }
            None => self.prices(),
        };

        if self.discount.is_none() {
            self.discount = Some(Decimal::ZERO);
        }
        prices
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
