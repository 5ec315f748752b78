//! Parameter validation.
//!
//! A parameter record is accepted only if every hard protocol bound and every
//! internal consistency rule holds. Validation is pure: the pallet persists a
//! record only after [`validate`] returned `Ok`, so a rejected update never
//! touches stored state.

use crate::{
  fixed::sum_parts,
  types::{BurnParams, EconomicParams, EmissionSplit, RedirectSplit},
};
use polkadot_sdk::sp_runtime::{FixedU128, Perquintill, traits::Zero};
use primitives::{ActivityType, DECIMAL_ONE, limits};

/// Class of a rejected update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
  /// Internally inconsistent parameter set
  Configuration,
  /// A value exceeds a hard protocol ceiling
  ProtocolCap,
}

/// Reason a parameter record was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamsError {
  BurnRateAboveCap,
  MaxBurnRatioAboveCap,
  InflationAboveCap,
  RedirectRatioAboveCap,
  EmissionShareAboveCap,
  StakingShareBelowFloor,
  MultiplierAboveCap,
  TierRatesNotMonotonic,
  ThresholdsNotOrdered,
  ZeroTargetUtilization,
  MultiplierBoundsInverted,
  MultiplierOutOfBounds,
  DuplicateActivity,
  MissingBaselineActivity,
  FeeSplitNotWhole,
  EmissionSplitNotWhole,
  RedirectSplitNotWhole,
  InflationBoundsInverted,
  ZeroEpochLength,
  ZeroBlocksPerYear,
  ZeroRedirectInterval,
  ZeroGasPriceFloor,
  InitialBaseFeeBelowMinimum,
}

impl ParamsError {
  pub fn kind(&self) -> ErrorKind {
    use ParamsError::*;
    match self {
      BurnRateAboveCap
      | MaxBurnRatioAboveCap
      | InflationAboveCap
      | RedirectRatioAboveCap
      | EmissionShareAboveCap
      | StakingShareBelowFloor
      | MultiplierAboveCap => ErrorKind::ProtocolCap,
      _ => ErrorKind::Configuration,
    }
  }

  /// Name of the violated invariant, for structured logs.
  pub fn as_str(&self) -> &'static str {
    use ParamsError::*;
    match self {
      BurnRateAboveCap => "burn_rate_cap",
      MaxBurnRatioAboveCap => "max_burn_ratio_cap",
      InflationAboveCap => "inflation_cap",
      RedirectRatioAboveCap => "redirect_ratio_cap",
      EmissionShareAboveCap => "emission_share_cap",
      StakingShareBelowFloor => "staking_share_floor",
      MultiplierAboveCap => "multiplier_cap",
      TierRatesNotMonotonic => "tier_rates_monotonic",
      ThresholdsNotOrdered => "thresholds_ordered",
      ZeroTargetUtilization => "target_utilization_nonzero",
      MultiplierBoundsInverted => "multiplier_bounds_ordered",
      MultiplierOutOfBounds => "multiplier_within_bounds",
      DuplicateActivity => "activity_unique",
      MissingBaselineActivity => "baseline_activity_present",
      FeeSplitNotWhole => "fee_split_sum",
      EmissionSplitNotWhole => "emission_split_sum",
      RedirectSplitNotWhole => "redirect_split_sum",
      InflationBoundsInverted => "inflation_bounds_ordered",
      ZeroEpochLength => "epoch_length_nonzero",
      ZeroBlocksPerYear => "blocks_per_year_nonzero",
      ZeroRedirectInterval => "redirect_interval_nonzero",
      ZeroGasPriceFloor => "gas_price_floor_nonzero",
      InitialBaseFeeBelowMinimum => "initial_base_fee_minimum",
    }
  }
}

fn is_whole(rates: &[Perquintill]) -> bool {
  sum_parts(rates) == DECIMAL_ONE
}

/// Validates a complete parameter record.
pub fn validate(params: &EconomicParams) -> Result<(), ParamsError> {
  let gas = &params.gas;
  if params.safety.min_gas_price_floor.is_zero() {
    return Err(ParamsError::ZeroGasPriceFloor);
  }
  if gas.initial_base_fee < gas.min_gas_price || gas.initial_base_fee < params.safety.min_gas_price_floor {
    return Err(ParamsError::InitialBaseFeeBelowMinimum);
  }

  let utilization = &params.utilization;
  if utilization.cool_threshold >= utilization.hot_threshold {
    return Err(ParamsError::ThresholdsNotOrdered);
  }
  if utilization.target.is_zero() {
    return Err(ParamsError::ZeroTargetUtilization);
  }

  validate_burn(&params.burn)?;

  let distribution = &params.distribution;
  if !is_whole(&[distribution.validator_ratio, distribution.treasury_ratio]) {
    return Err(ParamsError::FeeSplitNotWhole);
  }
  if params.safety.max_burn_ratio > limits::MAX_BURN_RATE {
    return Err(ParamsError::MaxBurnRatioAboveCap);
  }

  let emission = &params.emission;
  validate_emission_split(&emission.split)?;
  if emission.inflation_max > limits::MAX_INFLATION_RATE {
    return Err(ParamsError::InflationAboveCap);
  }
  if emission.inflation_min > emission.inflation_max {
    return Err(ParamsError::InflationBoundsInverted);
  }
  if emission.epoch_length == 0 {
    return Err(ParamsError::ZeroEpochLength);
  }
  if emission.blocks_per_year == 0 {
    return Err(ParamsError::ZeroBlocksPerYear);
  }

  let redirect = &params.redirect;
  if redirect.ratio > limits::MAX_REDIRECT_RATIO {
    return Err(ParamsError::RedirectRatioAboveCap);
  }
  validate_redirect_split(&redirect.split)?;
  if redirect.interval == 0 {
    return Err(ParamsError::ZeroRedirectInterval);
  }

  Ok(())
}

fn validate_burn(burn: &BurnParams) -> Result<(), ParamsError> {
  if burn.hot_rate > limits::MAX_BURN_RATE {
    return Err(ParamsError::BurnRateAboveCap);
  }
  if burn.cool_rate > burn.normal_rate || burn.normal_rate > burn.hot_rate {
    return Err(ParamsError::TierRatesNotMonotonic);
  }
  if burn.max_multiplier > limits::MAX_ACTIVITY_MULTIPLIER {
    return Err(ParamsError::MultiplierAboveCap);
  }
  if burn.min_multiplier > burn.max_multiplier {
    return Err(ParamsError::MultiplierBoundsInverted);
  }
  let entries = &burn.activity_multipliers;
  for (i, entry) in entries.iter().enumerate() {
    if entry.multiplier < burn.min_multiplier || entry.multiplier > burn.max_multiplier {
      return Err(ParamsError::MultiplierOutOfBounds);
    }
    if entries.iter().skip(i + 1).any(|e| e.activity == entry.activity) {
      return Err(ParamsError::DuplicateActivity);
    }
  }
  if !entries.iter().any(|e| e.activity == ActivityType::StandardGas) {
    return Err(ParamsError::MissingBaselineActivity);
  }
  Ok(())
}

/// Emission ratio invariants; also re-checked before every emission run.
pub fn validate_emission_split(split: &EmissionSplit) -> Result<(), ParamsError> {
  let shares = [split.staking, split.contribution, split.sequencer, split.treasury];
  if !is_whole(&shares) {
    return Err(ParamsError::EmissionSplitNotWhole);
  }
  if shares.iter().any(|s| *s > limits::MAX_EMISSION_SHARE) {
    return Err(ParamsError::EmissionShareAboveCap);
  }
  if split.staking < limits::MIN_STAKING_SHARE {
    return Err(ParamsError::StakingShareBelowFloor);
  }
  Ok(())
}

/// Redirect allocations must cover the whole redirected amount.
pub fn validate_redirect_split(split: &RedirectSplit) -> Result<(), ParamsError> {
  if !is_whole(&[split.development, split.ecosystem, split.security, split.reserve]) {
    return Err(ParamsError::RedirectSplitNotWhole);
  }
  Ok(())
}

/// Effective lower bound of the base fee.
pub fn base_fee_floor(params: &EconomicParams) -> FixedU128 {
  params.gas.min_gas_price.max(params.safety.min_gas_price_floor)
}
