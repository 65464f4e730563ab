//! # Rounding Module
//!
//! Decimal quantization used by every stored price.
//!
//! ## Why Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    100.0 × (1 - 0.1) = 90.00000000000001  ❌ WRONG!                     │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    100.0000 × 0.9000 = 90.00000000 exactly                             │
//! │    Rounding happens only where we say so, to a fixed digit count       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use discount_core::rounding::quantize;
//! use rust_decimal::Decimal;
//!
//! let price = Decimal::new(1_234_565, 5); // 12.34565
//! assert_eq!(quantize(price, 4), Decimal::new(123_456, 4)); // 12.3456
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to `scale` fractional digits using Bankers Rounding.
///
/// ## Bankers Rounding Explained
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  BANKERS ROUNDING (Round Half to Even)                              │
/// │                                                                     │
/// │  Standard rounding always rounds 0.5 UP, causing systematic bias:  │
/// │    0.5 → 1, 1.5 → 2, 2.5 → 3, 3.5 → 4 (always up = +bias)         │
/// │                                                                     │
/// │  Bankers Rounding rounds 0.5 to nearest EVEN number:               │
/// │    0.5 → 0, 1.5 → 2, 2.5 → 2, 3.5 → 4 (alternates = no bias)      │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The result always carries exactly `scale` fractional digits, so `90`
/// quantized to 2 prints as `90.00`.
pub fn quantize(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(scale);
    rounded
}

/// [`quantize`] lifted over an optional value.
#[inline]
pub fn quantize_opt(value: Option<Decimal>, scale: u32) -> Option<Decimal> {
    value.map(|v| quantize(v, scale))
}

// =============================================================================
// Unit Tests
// =============================================================================
