//! Treasury redirect planning.
//!
//! A capped share of the treasury inflow accumulated since the last execution is
//! routed to four sub-funds. Allocation dust is never moved and stays in the
//! treasury.

use crate::{
  error::SettlementError,
  fixed::checked_sum,
  params::validate_redirect_split,
  types::{RedirectParams, SubFund},
};
use polkadot_sdk::sp_runtime::{PerThing, Perquintill};
use primitives::{Balance, limits};

/// Transfers one redirect execution performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedirectPlan {
  pub inflow: Balance,
  pub effective_ratio: Perquintill,
  pub redirect_amount: Balance,
  pub allocations: [(SubFund, Balance); 4],
  /// Sum of the allocations; what actually leaves the treasury
  pub distributed: Balance,
  pub dust: Balance,
}

/// Whether a redirect should run at `now`.
pub fn is_due(params: &RedirectParams, now: u64, last_execution: u64, accumulated: Balance) -> bool {
  params.enabled
    && accumulated > 0
    && now.saturating_sub(last_execution) >= params.interval as u64
}

/// Plans the redirect of `inflow`, applying the hard ratio ceiling.
pub fn plan(inflow: Balance, params: &RedirectParams) -> Result<RedirectPlan, SettlementError> {
  validate_redirect_split(&params.split)?;
  let effective_ratio = params.ratio.min(limits::MAX_REDIRECT_RATIO);
  let redirect_amount = effective_ratio.mul_floor(inflow);

  let split = &params.split;
  let allocations = [
    (SubFund::Development, split.development.mul_floor(redirect_amount)),
    (SubFund::Ecosystem, split.ecosystem.mul_floor(redirect_amount)),
    (SubFund::Security, split.security.mul_floor(redirect_amount)),
    (SubFund::Reserve, split.reserve.mul_floor(redirect_amount)),
  ];
  let distributed = checked_sum(&allocations.map(|(_, amount)| amount))
    .ok_or(SettlementError::ArithmeticOverflow)?;
  let dust = redirect_amount
    .checked_sub(distributed)
    .ok_or_else(|| {
      log::error!(
        target: crate::LOG_TARGET,
        "conservation violated: redirect allocations {} exceed redirect amount {}",
        distributed,
        redirect_amount
      );
      SettlementError::ConservationViolation
    })?;

  Ok(RedirectPlan {
    inflow,
    effective_ratio,
    redirect_amount,
    allocations,
    distributed,
    dust,
  })
}
