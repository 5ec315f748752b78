//! Base fee adjustment toward target utilization.

use crate::{
  fixed::{mul_div_floor, scale_by_rate},
  params::base_fee_floor,
  types::EconomicParams,
};
use polkadot_sdk::sp_runtime::{
  FixedPointNumber, FixedU128, Perquintill,
  traits::{Bounded, Saturating},
};

/// Next block's base fee.
///
/// The step is `base * elasticity * |utilization - target| / target`, added above
/// target and subtracted below it. The result never drops under
/// `max(min_gas_price, min_gas_price_floor)`.
pub fn next_base_fee(current: FixedU128, utilization: Perquintill, params: &EconomicParams) -> FixedU128 {
  let floor = base_fee_floor(params);
  let target = params.utilization.target;
  if target.deconstruct() == 0 {
    return current.max(floor);
  }

  let scaled = scale_by_rate(current, params.gas.elasticity_multiplier).into_inner();
  let (above, deviation) = if utilization >= target {
    (true, utilization.deconstruct() - target.deconstruct())
  } else {
    (false, target.deconstruct() - utilization.deconstruct())
  };
  let step = mul_div_floor(scaled, deviation as u128, target.deconstruct() as u128);

  let next = if above {
    match step {
      Some(step) => current.saturating_add(FixedU128::from_inner(step)),
      None => FixedU128::max_value(),
    }
  } else {
    current.saturating_sub(FixedU128::from_inner(step.unwrap_or(0)))
  };
  next.max(floor)
}

/// Price actually charged per gas unit.
pub fn effective_gas_price(base_fee: FixedU128, params: &EconomicParams) -> FixedU128 {
  base_fee.max(base_fee_floor(params))
}

/// Largest accepted priority tip per gas unit.
pub fn max_tip(base_fee: FixedU128, params: &EconomicParams) -> FixedU128 {
  scale_by_rate(base_fee, params.gas.max_tip_ratio)
}
