//! Fixed-point helpers.
//!
//! Every decimal in the settlement path carries 18 fractional digits: ratios in
//! `[0, 1]` are `Perquintill`, values that may exceed one are `FixedU128`. All
//! products go through [`mul_div_floor`], so the only rounding rule anywhere is
//! truncation toward zero.

use polkadot_sdk::sp_core::U256;
use polkadot_sdk::sp_runtime::{FixedPointNumber, FixedU128, Perquintill};
use primitives::DECIMAL_ONE;

/// `floor(a * b / c)` with a 256-bit intermediate. `None` on division by zero or
/// when the result does not fit in `u128`.
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Option<u128> {
  if c == 0 {
    return None;
  }
  let result = U256::from(a)
    .checked_mul(U256::from(b))?
    .checked_div(U256::from(c))?;
  if result > U256::from(u128::MAX) {
    return None;
  }
  Some(result.as_u128())
}

/// Lossless widening of a ratio into the `FixedU128` scale.
pub fn rate_to_fixed(rate: Perquintill) -> FixedU128 {
  FixedU128::from_inner(rate.deconstruct() as u128)
}

/// Narrows a fixed-point value into a ratio, saturating at one.
pub fn fixed_to_rate(value: FixedU128) -> Perquintill {
  let inner = value.into_inner().min(DECIMAL_ONE);
  Perquintill::from_parts(inner as u64)
}

/// `a * b`, truncated.
pub fn mul_fixed(a: FixedU128, b: FixedU128) -> Option<FixedU128> {
  mul_div_floor(a.into_inner(), b.into_inner(), DECIMAL_ONE).map(FixedU128::from_inner)
}

/// `value * rate`, truncated. Never overflows since `rate <= 1`.
pub fn scale_by_rate(value: FixedU128, rate: Perquintill) -> FixedU128 {
  let scaled = mul_div_floor(value.into_inner(), rate.deconstruct() as u128, DECIMAL_ONE)
    .unwrap_or_else(|| value.into_inner());
  FixedU128::from_inner(scaled)
}

/// Sum of ratio parts, widened so four full ratios cannot overflow.
pub fn sum_parts(rates: &[Perquintill]) -> u128 {
  rates.iter().map(|r| r.deconstruct() as u128).sum()
}

/// Checked sum of balances.
pub fn checked_sum(amounts: &[u128]) -> Option<u128> {
  amounts
    .iter()
    .try_fold(0u128, |acc, amount| acc.checked_add(*amount))
}
