//! # Pricing Configuration
//!
//! Decimal precision settings used by every price calculation.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`INVOICE_DISCOUNT_*`)
//! 2. Defaults (this file)
//!
//! ## Digit Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field                        Fractional digits   Default              │
//! │  ───────────────────────────  ─────────────────   ───────              │
//! │  gross_unit_price             P                   4                    │
//! │  discount / invoice_discount  D                   4                    │
//! │  unit_price (net)             P + D               8                    │
//! │  gross_unit_price_unrounded   P + D               8                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The net price carries the extra `D` digits so that dividing it back by
//! `(1 - discount)` lands on the gross price the user typed.
//!
//! Configuration is read-only after loading; no locking is needed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::info;
use ts_rs::TS;

use crate::error::{ConfigError, CoreResult};
use crate::{DEFAULT_DISCOUNT_DIGITS, DEFAULT_UNIT_PRICE_DIGITS, MAX_SCALE};

/// Environment variable for the base price precision.
pub const ENV_UNIT_PRICE_DIGITS: &str = "INVOICE_DISCOUNT_UNIT_PRICE_DIGITS";

/// Environment variable for the discount precision.
pub const ENV_DISCOUNT_DIGITS: &str = "INVOICE_DISCOUNT_DISCOUNT_DIGITS";

/// Environment variable for the 100% discount fallback.
pub const ENV_FULL_DISCOUNT_POLICY: &str = "INVOICE_DISCOUNT_FULL_DISCOUNT_POLICY";

// =============================================================================
// Full Discount Policy
// =============================================================================

/// What the unrounded gross price falls back to when `net / (1 - discount)`
/// is undefined: the effective discount is exactly 1, or the quotient does
/// not fit the decimal type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum FullDiscountPolicy {
    /// Leave the value unchanged: the entered gross price, or the net price
    /// when no gross price was entered.
    #[default]
    Keep,

    /// Fall back to zero.
    Zero,
}

impl FullDiscountPolicy {
    /// The fallback for an underivable gross price, given the value that
    /// `Keep` leaves in place.
    #[inline]
    pub fn fallback(self, unchanged: Decimal) -> Decimal {
        match self {
            FullDiscountPolicy::Keep => unchanged,
            FullDiscountPolicy::Zero => Decimal::ZERO,
        }
    }
}

impl FromStr for FullDiscountPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(FullDiscountPolicy::Keep),
            "zero" => Ok(FullDiscountPolicy::Zero),
            _ => Err(()),
        }
    }
}

impl fmt::Display for FullDiscountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FullDiscountPolicy::Keep => f.write_str("keep"),
            FullDiscountPolicy::Zero => f.write_str("zero"),
        }
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// Precision and fallback settings for price reconciliation.
///
/// Deserializing goes through [`PricingConfig::new`], so a stored config
/// with `P + D > 28` is rejected the same way an environment one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "PricingConfigFields")]
pub struct PricingConfig {
    /// Base price precision (P). Gross unit prices are rounded to this.
    pub unit_price_digits: u32,

    /// Discount precision (D).
    pub discount_digits: u32,

    /// Fallback used when the effective discount is 100%.
    pub full_discount_policy: FullDiscountPolicy,
}

/// Unchecked wire form of [`PricingConfig`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricingConfigFields {
    unit_price_digits: u32,
    discount_digits: u32,
    #[serde(default)]
    full_discount_policy: FullDiscountPolicy,
}

impl TryFrom<PricingConfigFields> for PricingConfig {
    type Error = ConfigError;

    fn try_from(fields: PricingConfigFields) -> Result<Self, Self::Error> {
        PricingConfig::new(
            fields.unit_price_digits,
            fields.discount_digits,
            fields.full_discount_policy,
        )
    }
}

impl Default for PricingConfig {
    /// Four digits for prices and four for discounts, keep-on-100%.
    fn default() -> Self {
        PricingConfig {
            unit_price_digits: DEFAULT_UNIT_PRICE_DIGITS,
            discount_digits: DEFAULT_DISCOUNT_DIGITS,
            full_discount_policy: FullDiscountPolicy::Keep,
        }
    }
}

impl PricingConfig {
    /// Builds a config from explicit digits, rejecting combinations the
    /// decimal type cannot represent.
    pub fn new(
        unit_price_digits: u32,
        discount_digits: u32,
        full_discount_policy: FullDiscountPolicy,
    ) -> Result<Self, ConfigError> {
        if unit_price_digits + discount_digits > MAX_SCALE {
            return Err(ConfigError::PrecisionTooLarge {
                unit_price_digits,
                discount_digits,
                max: MAX_SCALE,
            });
        }

        Ok(PricingConfig {
            unit_price_digits,
            discount_digits,
            full_discount_policy,
        })
    }

    /// Load configuration from environment variables.
    pub fn load() -> CoreResult<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Missing keys fall back to defaults; present but unparseable keys are
    /// an error.
    pub fn load_from<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let unit_price_digits = parse_or(&lookup, ENV_UNIT_PRICE_DIGITS, DEFAULT_UNIT_PRICE_DIGITS)?;
        let discount_digits = parse_or(&lookup, ENV_DISCOUNT_DIGITS, DEFAULT_DISCOUNT_DIGITS)?;

        let full_discount_policy = match lookup(ENV_FULL_DISCOUNT_POLICY) {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_FULL_DISCOUNT_POLICY.to_string()))?,
            None => FullDiscountPolicy::default(),
        };

        let config = Self::new(unit_price_digits, discount_digits, full_discount_policy)?;

        info!(
            unit_price_digits = config.unit_price_digits,
            discount_digits = config.discount_digits,
            full_discount_policy = %config.full_discount_policy,
            "Pricing configuration loaded"
        );

        Ok(config)
    }

    /// Fractional digits of the gross unit price (P).
    #[inline]
    pub const fn gross_price_scale(&self) -> u32 {
        self.unit_price_digits
    }

    /// Fractional digits of the net unit price (P + D).
    #[inline]
    pub const fn net_price_scale(&self) -> u32 {
        self.unit_price_digits + self.discount_digits
    }

    /// Fractional digits of the unrounded gross price (P + D).
    #[inline]
    pub const fn unrounded_gross_scale(&self) -> u32 {
        self.unit_price_digits + self.discount_digits
    }

    /// Fractional digits of discount rates (D).
    #[inline]
    pub const fn discount_scale(&self) -> u32 {
        self.discount_digits
    }
}

fn parse_or<F>(lookup: &F, key: &str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PricingConfig::default();
        assert_eq!(config.gross_price_scale(), 4);
        assert_eq!(config.net_price_scale(), 8);
        assert_eq!(config.unrounded_gross_scale(), 8);
        assert_eq!(config.discount_scale(), 4);
        assert_eq!(config.full_discount_policy, FullDiscountPolicy::Keep);
    }

    #[test]
    fn test_load_from_empty_uses_defaults() {
        let config = PricingConfig::load_from(lookup(&[])).unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_load_from_overrides() {
        let config = PricingConfig::load_from(lookup(&[
            (ENV_UNIT_PRICE_DIGITS, "2"),
            (ENV_DISCOUNT_DIGITS, " 3 "),
            (ENV_FULL_DISCOUNT_POLICY, "Zero"),
        ]))
        .unwrap();

        assert_eq!(config.unit_price_digits, 2);
        assert_eq!(config.discount_digits, 3);
        assert_eq!(config.net_price_scale(), 5);
        assert_eq!(config.full_discount_policy, FullDiscountPolicy::Zero);
    }

    #[test]
    fn test_load_from_rejects_garbage() {
        let err = PricingConfig::load_from(lookup(&[(ENV_DISCOUNT_DIGITS, "four")])).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::InvalidValue(ref k)) if k == ENV_DISCOUNT_DIGITS));

        let err = PricingConfig::load_from(lookup(&[(ENV_FULL_DISCOUNT_POLICY, "maybe")])).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_load_from_rejects_precision_too_large() {
        let err = PricingConfig::load_from(lookup(&[
            (ENV_UNIT_PRICE_DIGITS, "20"),
            (ENV_DISCOUNT_DIGITS, "10"),
        ]))
        .unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::PrecisionTooLarge { max: 28, .. })));
    }

    #[test]
    fn test_precision_too_large() {
        let err = PricingConfig::new(20, 9, FullDiscountPolicy::Keep).unwrap_err();
        assert!(matches!(err, ConfigError::PrecisionTooLarge { max: 28, .. }));

        assert!(PricingConfig::new(20, 8, FullDiscountPolicy::Keep).is_ok());
    }

    #[test]
    fn test_serde_camel_case() {
        let json = serde_json::to_value(PricingConfig::default()).unwrap();
        assert_eq!(json["unitPriceDigits"], 4);
        assert_eq!(json["fullDiscountPolicy"], "keep");

        let back: PricingConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, PricingConfig::default());
    }

    #[test]
    fn test_deserialize_checks_precision() {
        let err = serde_json::from_value::<PricingConfig>(serde_json::json!({
            "unitPriceDigits": 20,
            "discountDigits": 10,
            "fullDiscountPolicy": "zero"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("exceed 28"));

        let config: PricingConfig = serde_json::from_value(serde_json::json!({
            "unitPriceDigits": 2,
            "discountDigits": 3
        }))
        .unwrap();
        assert_eq!(config.net_price_scale(), 5);
        assert_eq!(config.full_discount_policy, FullDiscountPolicy::Keep);
    }

    #[test]
    fn test_policy_fallback() {
        assert_eq!(FullDiscountPolicy::Keep.fallback(Decimal::TEN), Decimal::TEN);
        assert_eq!(FullDiscountPolicy::Zero.fallback(Decimal::TEN), Decimal::ZERO);
    }
}
