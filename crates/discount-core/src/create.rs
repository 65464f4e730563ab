//! # Creation Hook
//!
//! Fills in the gross price and discount of lines about to be created.
//!
//! Lines arrive from many places (imports, other documents, the API) with
//! only a net unit price. Before they are stored the gross price is
//! back-computed so the gross/discount entry stays consistent.

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::PricingConfig;
use crate::pricing::{reconcile, Discounts};
use crate::rounding::{quantize, quantize_opt};
use crate::types::{InvoiceLine, LinePrices, NewInvoiceLine};

/// Prepares a batch of field-value mappings for creation.
///
/// Returns copies; the input is not modified. Per priced mapping:
/// - net price present: gross price = `net / (1-d) / (1-i)` (rates that are
///   absent or exactly 1 skipped), rounded only if it differs from the net
///   price;
/// - only a gross price present: net price derived from it;
/// - neither present: gross price set to 0;
/// - discount defaults to 0.
///
/// Both discount rates are rounded to the configured discount digits first.
pub fn prepare_create(values: &[NewInvoiceLine], config: &PricingConfig) -> Vec<NewInvoiceLine> {
    values
        .iter()
        .map(|vals| prepare_one(vals.clone(), config))
        .collect()
}

fn prepare_one(mut vals: NewInvoiceLine, config: &PricingConfig) -> NewInvoiceLine {
    if !vals.line_type.is_priced() {
        return vals;
    }

    vals.discount = quantize_opt(vals.discount, config.discount_scale());
    vals.invoice_discount = quantize_opt(vals.invoice_discount, config.discount_scale());

    match (vals.unit_price, vals.gross_unit_price) {
        (Some(net), _) => {
            let unrounded = vals.discounts().gross_from_net(net, config.full_discount_policy);
            let gross = if unrounded != net {
                quantize(unrounded, config.gross_price_scale())
            } else {
                unrounded
            };
            vals.gross_unit_price = Some(gross);
            vals.gross_unit_price_unrounded = Some(quantize(unrounded, config.unrounded_gross_scale()));
        }
        (None, Some(_)) => {
            let prices = LinePrices {
                unit_price: None,
                gross_unit_price: vals.gross_unit_price,
                gross_unit_price_unrounded: None,
            };
            // No rates at all: the gross price is the net price.
            let discounts = match vals.discounts() {
                d if d.is_present() => d,
                _ => Discounts::line(Decimal::ZERO),
            };
            let prices = reconcile(prices, discounts, config);
            vals.unit_price = prices.unit_price;
            vals.gross_unit_price = prices.gross_unit_price;
            vals.gross_unit_price_unrounded = prices.gross_unit_price_unrounded;
        }
        (None, None) => {
            vals.gross_unit_price = Some(Decimal::ZERO);
            debug!("Line created without prices, gross price set to zero");
            return vals;
        }
    }

    if vals.discount.is_none() {
        vals.discount = Some(Decimal::ZERO);
    }

    debug!(
        unit_price = ?vals.unit_price,
        gross_unit_price = ?vals.gross_unit_price,
        discount = ?vals.discount,
        "Prepared line for creation"
    );
    vals
}

impl InvoiceLine {
    /// Builds a line record from field values, running the creation hook
    /// and assigning a fresh UUID v4.
    pub fn create(values: NewInvoiceLine, config: &PricingConfig) -> InvoiceLine {
        let vals = prepare_one(values, config);

        InvoiceLine {
            id: Uuid::new_v4().to_string(),
            line_type: vals.line_type,
            quantity: vals.quantity.unwrap_or(Decimal::ONE),
            unit_price: vals.unit_price,
            gross_unit_price: vals.gross_unit_price,
            gross_unit_price_unrounded: vals.gross_unit_price_unrounded,
            discount: vals.discount,
            invoice_discount: vals.invoice_discount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FullDiscountPolicy;
    use crate::types::InvoiceLineType;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn from_json(value: serde_json::Value) -> NewInvoiceLine {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_net_price_without_discount() {
        let out = prepare_create(&[from_json(json!({ "unit_price": "50" }))], &PricingConfig::default());

        assert_eq!(out[0].gross_unit_price, Some(dec!(50)));
        assert_eq!(out[0].discount, Some(Decimal::ZERO));
        assert_eq!(out[0].unit_price, Some(dec!(50)));
    }

    #[test]
    fn test_net_price_with_discount() {
        let vals = from_json(json!({ "unit_price": "90.00", "discount": "0.10" }));
        let out = prepare_create(&[vals], &PricingConfig::default());

        assert_eq!(out[0].gross_unit_price, Some(dec!(100)));
        assert_eq!(out[0].discount, Some(dec!(0.10)));
    }

    #[test]
    fn test_net_price_with_both_discounts() {
        let vals = from_json(json!({
            "unit_price": "81",
            "discount": "0.1",
            "invoice_discount": "0.1"
        }));
        let out = prepare_create(&[vals], &PricingConfig::default());
        assert_eq!(out[0].gross_unit_price, Some(dec!(100)));
    }

    #[test]
    fn test_back_computed_gross_is_rounded() {
        let vals = from_json(json!({ "unit_price": "10", "discount": "0.3" }));
        let out = prepare_create(&[vals], &PricingConfig::default());
        // 10 / 0.7 = 14.285714...
        assert_eq!(out[0].gross_unit_price, Some(dec!(14.2857)));
        assert_eq!(out[0].gross_unit_price_unrounded, Some(dec!(14.28571429)));
    }

    #[test]
    fn test_full_discount_on_create() {
        let vals = from_json(json!({ "unit_price": "0", "discount": "1" }));
        let out = prepare_create(&[vals.clone()], &PricingConfig::default());
        assert_eq!(out[0].gross_unit_price, Some(Decimal::ZERO));

        let vals = from_json(json!({ "unit_price": "5", "discount": "1" }));
        let out = prepare_create(&[vals.clone()], &PricingConfig::default());
        assert_eq!(out[0].gross_unit_price, Some(dec!(5)));

        let config = PricingConfig {
            full_discount_policy: FullDiscountPolicy::Zero,
            ..PricingConfig::default()
        };
        let out = prepare_create(&[vals], &config);
        assert_eq!(out[0].gross_unit_price, Some(Decimal::ZERO));
    }

    #[test]
    fn test_full_line_discount_with_invoice_discount_on_create() {
        // The full line rate is skipped and only the invoice rate divided out
        let vals = from_json(json!({
            "unit_price": "10",
            "discount": "1",
            "invoice_discount": "0.5"
        }));
        let out = prepare_create(&[vals], &PricingConfig::default());
        assert_eq!(out[0].gross_unit_price, Some(dec!(20)));
    }

    #[test]
    fn test_overflowing_gross_on_create() {
        let vals = from_json(json!({
            "unit_price": "10000000000000000000000000",
            "discount": "0.9999"
        }));
        let out = prepare_create(&[vals.clone()], &PricingConfig::default());
        assert_eq!(out[0].gross_unit_price, Some(dec!(10000000000000000000000000)));

        let config = PricingConfig {
            full_discount_policy: FullDiscountPolicy::Zero,
            ..PricingConfig::default()
        };
        let out = prepare_create(&[vals], &config);
        assert_eq!(out[0].gross_unit_price, Some(Decimal::ZERO));
    }

    #[test]
    fn test_discounts_rounded_on_create() {
        let vals = from_json(json!({
            "unit_price": "90",
            "discount": "0.10004",
            "invoice_discount": "0.00006"
        }));
        let out = prepare_create(&[vals], &PricingConfig::default());
        assert_eq!(out[0].discount, Some(dec!(0.1000)));
        assert_eq!(out[0].invoice_discount, Some(dec!(0.0001)));
    }

    #[test]
    fn test_gross_price_only() {
        let vals = from_json(json!({ "gross_unit_price": "100", "discount": "0.25" }));
        let out = prepare_create(&[vals], &PricingConfig::default());
        assert_eq!(out[0].unit_price, Some(dec!(75)));

        let vals = from_json(json!({ "gross_unit_price": "20" }));
        let out = prepare_create(&[vals], &PricingConfig::default());
        assert_eq!(out[0].unit_price, Some(dec!(20)));
        assert_eq!(out[0].discount, Some(Decimal::ZERO));
    }

    #[test]
    fn test_no_prices() {
        let out = prepare_create(&[NewInvoiceLine::default()], &PricingConfig::default());
        assert_eq!(out[0].gross_unit_price, Some(Decimal::ZERO));
        assert_eq!(out[0].unit_price, None);
        assert_eq!(out[0].discount, None);
    }

    #[test]
    fn test_non_priced_lines_pass_through() {
        let vals = NewInvoiceLine {
            line_type: InvoiceLineType::Title,
            ..NewInvoiceLine::default()
        };
        let out = prepare_create(&[vals.clone()], &PricingConfig::default());
        assert_eq!(out[0], vals);
    }

    #[test]
    fn test_input_not_mutated() {
        let input = vec![from_json(json!({ "unit_price": "50" }))];
        let _ = prepare_create(&input, &PricingConfig::default());
        assert_eq!(input[0].gross_unit_price, None);
        assert_eq!(input[0].discount, None);
    }

    #[test]
    fn test_create_assigns_id() {
        let line = InvoiceLine::create(
            from_json(json!({ "unit_price": "90", "discount": "0.1", "quantity": "3" })),
            &PricingConfig::default(),
        );
        assert!(crate::validation::validate_line_id(&line.id).is_ok());
        assert_eq!(line.quantity, dec!(3));
        assert_eq!(line.gross_unit_price, Some(dec!(100)));
    }
}
