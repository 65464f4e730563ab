//! # Price Reconciliation
//!
//! Given any two of {gross unit price, discount, net unit price}, derive the
//! third.
//!
//! ## Reconciliation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      reconcile(prices, discounts)                       │
//! │                                                                         │
//! │  gross + discount ──► net = gross × (1-d) × (1-i)                      │
//! │                       unrounded = net / (1 - effective)                │
//! │                       gross = round(unrounded, P)                      │
//! │                                                                         │
//! │  net + discount   ──► unrounded = net / (1 - effective)                │
//! │  (gross missing)      gross = round(unrounded, P)                      │
//! │                                                                         │
//! │  anything else    ──► net untouched, gross passed through              │
//! │                                                                         │
//! │  effective = 1    ──► FullDiscountPolicy fallback, never divides       │
//! │  overflow         ──► same fallback, never panics                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use discount_core::config::PricingConfig;
//! use discount_core::pricing::{reconcile, Discounts};
//! use discount_core::types::LinePrices;
//! use rust_decimal::Decimal;
//!
//! let prices = LinePrices {
//!     gross_unit_price: Some(Decimal::new(100, 0)),
//!     ..LinePrices::default()
//! };
//! let discounts = Discounts::line(Decimal::new(10, 2)); // 10%
//!
//! let result = reconcile(prices, discounts, &PricingConfig::default());
//! assert_eq!(result.unit_price, Some(Decimal::new(90, 0)));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{FullDiscountPolicy, PricingConfig};
use crate::rounding::quantize;
use crate::types::LinePrices;

// =============================================================================
// Discounts
// =============================================================================

/// The discount rates applying to one line.
///
/// `line` is the discount entered on the line itself; `invoice` is an
/// invoice-wide discount stacked on top of it. Both are fractions where
/// `0.1` means 10%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discounts {
    pub line: Option<Decimal>,
    pub invoice: Option<Decimal>,
}

impl Discounts {
    pub const fn new(line: Option<Decimal>, invoice: Option<Decimal>) -> Self {
        Discounts { line, invoice }
    }

    /// Only a line discount.
    pub const fn line(rate: Decimal) -> Self {
        Discounts {
            line: Some(rate),
            invoice: None,
        }
    }

    /// Whether either rate is set (zero counts as set).
    #[inline]
    pub fn is_present(&self) -> bool {
        self.line.is_some() || self.invoice.is_some()
    }

    /// The single rate equivalent to applying both discounts in turn.
    ///
    /// `d + i - d·i`, which equals `1 - (1-d)(1-i)`. Rates far outside
    /// [0, 1] can overflow the stacking; the pair is then treated as absent
    /// and the prices pass through.
    pub fn effective(&self) -> Option<Decimal> {
        match (self.line, self.invoice) {
            (Some(d), Some(i)) => {
                let stacked = d
                    .checked_mul(i)
                    .and_then(|both| d.checked_add(i)?.checked_sub(both));
                if stacked.is_none() {
                    warn!(line = %d, invoice = %i, "Stacked discount overflowed, treated as absent");
                }
                stacked
            }
            (Some(d), None) => Some(d),
            (None, Some(i)) => Some(i),
            (None, None) => None,
        }
    }

    /// True when the effective discount is exactly 100%.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.effective() == Some(Decimal::ONE)
    }

    /// Applies every present, non-zero rate to `gross`. Not rounded.
    ///
    /// `None` when the product overflows.
    pub fn apply(&self, gross: Decimal) -> Option<Decimal> {
        self.rates()
            .filter(|rate| !rate.is_zero())
            .try_fold(gross, |price, rate| price.checked_mul(Decimal::ONE.checked_sub(rate)?))
    }

    /// Derives the gross price of a line being created from its net price.
    /// Not rounded.
    ///
    /// Each rate is divided out in turn; a rate of exactly 1 is skipped.
    /// Under `Zero` a 100% effective discount yields 0. A quotient too large
    /// for the decimal type resolves through the policy as well.
    pub fn gross_from_net(&self, net: Decimal, policy: FullDiscountPolicy) -> Decimal {
        if self.is_full() {
            warn!(net = %net, policy = %policy, "100% discount, gross price derived by fallback");
            if policy == FullDiscountPolicy::Zero {
                return Decimal::ZERO;
            }
        }

        let divided = self
            .rates()
            .filter(|rate| !rate.is_zero() && *rate != Decimal::ONE)
            .try_fold(net, |price, rate| price.checked_div(Decimal::ONE.checked_sub(rate)?));

        divided.unwrap_or_else(|| {
            warn!(net = %net, policy = %policy, "Gross price overflowed, derived by fallback");
            policy.fallback(net)
        })
    }

    fn rates(&self) -> impl Iterator<Item = Decimal> {
        self.line.into_iter().chain(self.invoice)
    }
}

/// `net / (1 - effective)`, or the policy fallback when the discount is 100%
/// or the quotient overflows. Not rounded.
fn gross_from_effective(net: Decimal, effective: Decimal, policy: FullDiscountPolicy) -> Decimal {
    if effective == Decimal::ONE {
        warn!(net = %net, policy = %policy, "100% discount, gross price derived by fallback");
        return policy.fallback(net);
    }

    match Decimal::ONE
        .checked_sub(effective)
        .and_then(|remaining| net.checked_div(remaining))
    {
        Some(gross) => gross,
        None => {
            warn!(
                net = %net,
                effective_discount = %effective,
                policy = %policy,
                "Gross price overflowed, derived by fallback"
            );
            policy.fallback(net)
        }
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Reconciles net price, gross price and discount for one line.
///
/// Pure: the returned [`LinePrices`] is the only output. Never divides by
/// zero and never overflows; a 100% discount or a quotient the decimal type
/// cannot hold resolves through `config.full_discount_policy`.
///
/// ## Branches
/// 1. Gross price and a discount present: the net price is derived from the
///    gross price and the unrounded gross is re-derived from the unrounded
///    net, so it matches what was entered. At 100% the unrounded gross
///    falls back to the entered gross (`Keep`) or 0 (`Zero`).
/// 2. Net price and a discount present, gross missing: the gross price is
///    `net / (1 - effective)`. At 100% it falls back to the net price itself
///    (`Keep`) or 0 (`Zero`).
/// 3. Otherwise: the net price is left alone and the gross price passes
///    through.
pub fn reconcile(prices: LinePrices, discounts: Discounts, config: &PricingConfig) -> LinePrices {
    let policy = config.full_discount_policy;

    match (prices.gross_unit_price, prices.unit_price, discounts.effective()) {
        (Some(gross), _, Some(effective)) => {
            let Some(net) = discounts.apply(gross) else {
                warn!(gross = %gross, effective_discount = %effective, "Net price overflowed, prices passed through");
                return passthrough(prices);
            };

            let unrounded = if effective == Decimal::ONE {
                warn!(gross = %gross, policy = %policy, "100% discount, unrounded gross price left to fallback");
                policy.fallback(gross)
            } else {
                match Decimal::ONE
                    .checked_sub(effective)
                    .and_then(|remaining| net.checked_div(remaining))
                {
                    Some(unrounded) => unrounded,
                    None => {
                        warn!(
                            gross = %gross,
                            effective_discount = %effective,
                            policy = %policy,
                            "Unrounded gross price overflowed, left to fallback"
                        );
                        policy.fallback(gross)
                    }
                }
            };

            let result = LinePrices {
                unit_price: Some(quantize(net, config.net_price_scale())),
                gross_unit_price: Some(quantize(unrounded, config.gross_price_scale())),
                gross_unit_price_unrounded: Some(quantize(unrounded, config.unrounded_gross_scale())),
            };

            debug!(
                gross = %gross,
                effective_discount = %effective,
                unit_price = ?result.unit_price,
                "Derived net price from gross price"
            );
            result
        }

        (None, Some(net), Some(effective)) => {
            let unrounded = gross_from_effective(net, effective, policy);

            let result = LinePrices {
                unit_price: Some(net),
                gross_unit_price: Some(quantize(unrounded, config.gross_price_scale())),
                gross_unit_price_unrounded: Some(quantize(unrounded, config.unrounded_gross_scale())),
            };

            debug!(
                unit_price = %net,
                effective_discount = %effective,
                gross = ?result.gross_unit_price,
                "Derived gross price from net price"
            );
            result
        }

        _ => {
            debug!(
                unit_price = ?prices.unit_price,
                gross = ?prices.gross_unit_price,
                "Nothing to reconcile, prices passed through"
            );
            passthrough(prices)
        }
    }
}

fn passthrough(prices: LinePrices) -> LinePrices {
    LinePrices {
        unit_price: prices.unit_price,
        gross_unit_price: prices.gross_unit_price,
        gross_unit_price_unrounded: prices.gross_unit_price,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
