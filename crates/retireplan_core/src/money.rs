//! Cent-level rounding shared by every monetary computation.
//!
//! Balances are rounded after each arithmetic step rather than once at the
//! end. Later steps consume the already-rounded values, so the rounding mode
//! matters: halves always round toward positive infinity.

/// Round a monetary value to whole cents, halves toward +∞.
#[inline]
pub fn round_money(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * 100.0 + 0.5).floor() / 100.0;
    // Normalise -0.0 so serialized output never shows a signed zero
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Convert an annual percentage (`6.0` = 6 %) into a monthly decimal rate.
#[inline]
pub fn monthly_rate_from_percent(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / 12.0
}

/// Round a non-monetary quantity (ages, years) to two decimals.
#[inline]
pub fn round_two(value: f64) -> f64 {
    round_money(value)
}
