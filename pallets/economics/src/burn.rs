//! Burn tier selection and the unified burn calculation.
//!
//! [`split_fee`] is the only place a fee is divided into burn, treasury and
//! validator amounts. Block fee processing and per-activity queries both reach
//! it through [`compute`].

use crate::{
  error::SettlementError,
  fixed::{fixed_to_rate, mul_fixed, rate_to_fixed},
  types::{BurnCalculation, BurnParams, BurnTier, DistributionParams, EconomicParams, UtilizationParams},
};
use polkadot_sdk::sp_runtime::{FixedU128, PerThing, Perquintill};
use primitives::{ActivityType, Balance, DECIMAL_ONE, limits};

/// Picks the tier for `utilization`. A value on a threshold belongs to the
/// higher tier.
pub fn select_tier(
  utilization: Perquintill,
  thresholds: &UtilizationParams,
  burn: &BurnParams,
) -> (Perquintill, BurnTier) {
  if utilization < thresholds.cool_threshold {
    (burn.cool_rate, BurnTier::Cool)
  } else if utilization < thresholds.hot_threshold {
    (burn.normal_rate, BurnTier::Normal)
  } else {
    (burn.hot_rate, BurnTier::Hot)
  }
}

/// Multiplier for `activity`, falling back to the standard gas baseline, then to one.
pub fn multiplier_for(burn: &BurnParams, activity: ActivityType) -> FixedU128 {
  let lookup = |wanted: ActivityType| {
    burn
      .activity_multipliers
      .iter()
      .find(|entry| entry.activity == wanted)
      .map(|entry| entry.multiplier)
  };
  lookup(activity)
    .or_else(|| lookup(ActivityType::StandardGas))
    .unwrap_or_else(|| FixedU128::from_inner(DECIMAL_ONE))
}

/// Divides `total_fee` into `(burn, treasury, validator)`.
///
/// Burn and treasury truncate; the validator share absorbs the remainder.
pub fn split_fee(
  total_fee: Balance,
  effective_rate: Perquintill,
  treasury_ratio: Perquintill,
) -> Result<(Balance, Balance, Balance), SettlementError> {
  let burn = effective_rate.mul_floor(total_fee);
  let distributable = total_fee
    .checked_sub(burn)
    .ok_or(SettlementError::ConservationViolation)?;
  let treasury = treasury_ratio.mul_floor(distributable);
  let validator = distributable
    .checked_sub(treasury)
    .ok_or(SettlementError::ConservationViolation)?;

  let total = burn
    .checked_add(treasury)
    .and_then(|sum| sum.checked_add(validator))
    .ok_or(SettlementError::ArithmeticOverflow)?;
  if total != total_fee {
    log::error!(
      target: crate::LOG_TARGET,
      "conservation violated: burn {} + treasury {} + validator {} != fee {}",
      burn,
      treasury,
      validator,
      total_fee
    );
    return Err(SettlementError::ConservationViolation);
  }
  Ok((burn, treasury, validator))
}

/// Unified burn calculation, capped at the absolute ceiling.
pub fn compute(
  params: &EconomicParams,
  utilization: Perquintill,
  total_fee: Balance,
  activity: ActivityType,
) -> Result<BurnCalculation, SettlementError> {
  let (base_rate, tier) = select_tier(utilization, &params.utilization, &params.burn);
  let multiplier = multiplier_for(&params.burn, activity);

  let raw =
    mul_fixed(rate_to_fixed(base_rate), multiplier).ok_or(SettlementError::ArithmeticOverflow)?;
  let cap = rate_to_fixed(limits::MAX_BURN_RATE);
  let was_capped = raw > cap;
  let effective_rate = fixed_to_rate(raw.min(cap));

  let (burn_amount, treasury_amount, validator_amount) =
    split_fee(total_fee, effective_rate, params.distribution.treasury_ratio)?;

  Ok(BurnCalculation {
    activity,
    base_rate,
    multiplier,
    effective_rate,
    tier,
    burn_amount,
    treasury_amount,
    validator_amount,
    was_capped,
  })
}

/// Re-applies `ceiling` (itself bounded by the hard limit) to a calculation.
pub fn reclamp(
  calc: BurnCalculation,
  ceiling: Perquintill,
  distribution: &DistributionParams,
) -> Result<BurnCalculation, SettlementError> {
  let ceiling = ceiling.min(limits::MAX_BURN_RATE);
  if calc.effective_rate <= ceiling {
    return Ok(calc);
  }
  let total = calc.total().ok_or(SettlementError::ArithmeticOverflow)?;
  let (burn_amount, treasury_amount, validator_amount) =
    split_fee(total, ceiling, distribution.treasury_ratio)?;
  Ok(BurnCalculation {
    effective_rate: ceiling,
    burn_amount,
    treasury_amount,
    validator_amount,
    was_capped: true,
    ..calc
  })
}
