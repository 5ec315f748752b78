//! Block utilization tracking.

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{
  dispatch::DispatchClass,
  traits::Get,
  weights::constants::WEIGHT_REF_TIME_PER_MILLIS,
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::Perquintill;
use primitives::DECIMAL_ONE;

use crate::fixed::mul_div_floor;

/// Gas consumption reported by the block execution host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasMetrics {
  pub gas_used: u64,
  pub max_block_gas: u64,
}

/// Host seam supplying live block metrics to the settlement pipeline.
pub trait BlockGasMeter {
  /// Gas used and block gas limit of the block being finalized, if known.
  fn gas_metrics() -> Option<GasMetrics>;

  /// Execution time of the block being finalized, in milliseconds.
  fn execution_time_ms() -> Option<u64> {
    None
  }
}

impl BlockGasMeter for () {
  fn gas_metrics() -> Option<GasMetrics> {
    None
  }
}

/// Reads consumed block weight from `frame_system`, treating ref-time as gas.
///
/// Only normal-class weight counts as gas, measured against the normal-class
/// limit. Mandatory weight, including this pallet's own `on_initialize`
/// reservation, is left out. Execution time is the consumed non-mandatory
/// ref-time in milliseconds.
pub struct SystemWeightMeter<T>(PhantomData<T>);

impl<T: frame_system::Config> BlockGasMeter for SystemWeightMeter<T> {
  fn gas_metrics() -> Option<GasMetrics> {
    let limits = T::BlockWeights::get();
    let max_block_gas = limits
      .get(DispatchClass::Normal)
      .max_total
      .unwrap_or(limits.max_block)
      .ref_time();
    let gas_used = frame_system::BlockWeight::<T>::get()
      .get(DispatchClass::Normal)
      .ref_time();
    Some(GasMetrics {
      gas_used,
      max_block_gas,
    })
  }

  fn execution_time_ms() -> Option<u64> {
    let consumed = frame_system::BlockWeight::<T>::get();
    let ref_time = consumed
      .get(DispatchClass::Normal)
      .ref_time()
      .saturating_add(consumed.get(DispatchClass::Operational).ref_time());
    Some(ref_time / WEIGHT_REF_TIME_PER_MILLIS)
  }
}

/// `gas_used / max_block_gas` clamped to `[0, 1]`.
///
/// Missing metrics or a zero gas limit fall back to `previous`.
pub fn from_metrics(metrics: Option<GasMetrics>, previous: Perquintill) -> Perquintill {
  let Some(metrics) = metrics else {
    return previous;
  };
  if metrics.max_block_gas == 0 {
    return previous;
  }
  let used = metrics.gas_used.min(metrics.max_block_gas);
  match mul_div_floor(used as u128, DECIMAL_ONE, metrics.max_block_gas as u128) {
    Some(parts) => Perquintill::from_parts(parts as u64),
    None => previous,
  }
}
