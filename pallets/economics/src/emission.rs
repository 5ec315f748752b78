//! Epoch emission calculation.
//!
//! Pure: given the block height, the current supply and the global cap, derives
//! how much to mint this epoch and how it splits across recipients. Minting is
//! done by the pallet only after the split passed its conservation check.

use crate::{
  error::SettlementError,
  fixed::checked_sum,
  params::validate_emission_split,
  types::{EmissionParams, EmissionSplit},
};
use polkadot_sdk::sp_runtime::{PerThing, Perquintill};
use primitives::{Balance, INFLATION_SCHEDULE, limits};

/// Per-recipient amounts of one emission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmissionShares {
  pub staking: Balance,
  pub contribution: Balance,
  pub sequencer: Balance,
  /// Includes the truncation dust of the other shares
  pub treasury: Balance,
}

impl EmissionShares {
  pub fn total(&self) -> Option<Balance> {
    checked_sum(&[self.staking, self.contribution, self.sequencer, self.treasury])
  }
}

/// Outcome of one emission calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmissionOutcome {
  pub inflation_rate: Perquintill,
  pub annual_provisions: Balance,
  pub block_provision: Balance,
  /// Epoch emission before the supply cap was applied
  pub requested: Balance,
  /// Amount actually minted
  pub emitted: Balance,
  pub capped: bool,
  pub shares: EmissionShares,
}

/// Annual inflation rate for `height`.
///
/// Year `n` since genesis reads entry `n` of the schedule (the last entry past the
/// end), then is bounded to `[inflation_min, min(inflation_max, hard cap)]`.
pub fn inflation_rate_at(height: u64, params: &EmissionParams) -> Perquintill {
  let year = height.checked_div(params.blocks_per_year as u64).unwrap_or(0);
  let index = (year.min(INFLATION_SCHEDULE.len() as u64 - 1)) as usize;
  let scheduled = INFLATION_SCHEDULE[index];
  let upper = params.inflation_max.min(limits::MAX_INFLATION_RATE);
  let lower = params.inflation_min.min(upper);
  scheduled.clamp(lower, upper)
}

/// Splits `total` by `split`; each share truncates and the dust goes to treasury.
pub fn split_emission(total: Balance, split: &EmissionSplit) -> Result<EmissionShares, SettlementError> {
  validate_emission_split(split)?;
  let staking = split.staking.mul_floor(total);
  let contribution = split.contribution.mul_floor(total);
  let sequencer = split.sequencer.mul_floor(total);
  let assigned = checked_sum(&[staking, contribution, sequencer])
    .ok_or(SettlementError::ArithmeticOverflow)?;
  let treasury = total
    .checked_sub(assigned)
    .ok_or(SettlementError::ConservationViolation)?;

  let shares = EmissionShares {
    staking,
    contribution,
    sequencer,
    treasury,
  };
  if shares.total() != Some(total) {
    log::error!(
      target: crate::LOG_TARGET,
      "conservation violated: emission shares {:?} != {}",
      shares,
      total
    );
    return Err(SettlementError::ConservationViolation);
  }
  Ok(shares)
}

/// Blocks owed emission at `height`, given that every block up to
/// `last_covered` has already been emitted for.
///
/// Emission lands on epoch boundaries; a boundary that was missed stays owed
/// until a later block settles it.
pub fn owed_blocks(height: u64, last_covered: u64, epoch_length: u32) -> Option<u64> {
  let epoch_length = epoch_length as u64;
  if epoch_length == 0 {
    return None;
  }
  let boundary = height - height % epoch_length;
  (boundary > last_covered).then(|| boundary - last_covered)
}

/// Emission owed for `blocks` blocks ending at `height`.
///
/// `blocks` is one epoch in steady state, more when an earlier epoch was missed.
pub fn calculate(
  height: u64,
  blocks: u64,
  current_supply: Balance,
  max_supply: Balance,
  params: &EmissionParams,
) -> Result<EmissionOutcome, SettlementError> {
  validate_emission_split(&params.split)?;
  if params.blocks_per_year == 0 {
    return Err(crate::params::ParamsError::ZeroBlocksPerYear.into());
  }

  let inflation_rate = inflation_rate_at(height, params);
  let annual_provisions = inflation_rate.mul_floor(current_supply);
  let block_provision = annual_provisions / params.blocks_per_year as u128;
  let requested = block_provision
    .checked_mul(blocks as u128)
    .ok_or(SettlementError::ArithmeticOverflow)?;

  let headroom = max_supply.saturating_sub(current_supply);
  let capped = requested > headroom;
  let emitted = requested.min(headroom);
  let shares = split_emission(emitted, &params.split)?;

  Ok(EmissionOutcome {
    inflation_rate,
    annual_provisions,
    block_provision,
    requested,
    emitted,
    capped,
    shares,
  })
}
