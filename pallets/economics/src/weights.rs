#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{
  traits::Get,
  weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
  fn update_params() -> Weight;
  fn set_treasury_account() -> Weight;
  fn set_redirect_targets() -> Weight;
  fn apply_pending_params() -> Weight;
  fn settle_block() -> Weight;
  fn process_emission() -> Weight;
  fn process_treasury_redirect() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config + crate::Config> WeightInfo for SubstrateWeight<T> {
  fn update_params() -> Weight {
    Weight::from_parts(18_000_000, 1500)
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_treasury_account() -> Weight {
    Weight::from_parts(10_000_000, 600)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_redirect_targets() -> Weight {
    Weight::from_parts(12_000_000, 900)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn apply_pending_params() -> Weight {
    Weight::from_parts(8_000_000, 1500)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(2))
  }

  // Fee split, burn, treasury transfer, counters, base fee and telemetry
  fn settle_block() -> Weight {
    Weight::from_parts(65_000_000, 4200)
      .saturating_add(T::DbWeight::get().reads(12))
      .saturating_add(T::DbWeight::get().writes(10))
  }

  // Four mints plus the record append
  fn process_emission() -> Weight {
    Weight::from_parts(70_000_000, 4800)
      .saturating_add(T::DbWeight::get().reads(8))
      .saturating_add(T::DbWeight::get().writes(8))
  }

  // Four transfers out of the treasury
  fn process_treasury_redirect() -> Weight {
    Weight::from_parts(60_000_000, 4000)
      .saturating_add(T::DbWeight::get().reads(9))
      .saturating_add(T::DbWeight::get().writes(8))
  }
}

impl WeightInfo for () {
  fn update_params() -> Weight { Weight::from_parts(18_000_000, 1500) }
  fn set_treasury_account() -> Weight { Weight::from_parts(10_000_000, 600) }
  fn set_redirect_targets() -> Weight { Weight::from_parts(12_000_000, 900) }
  fn apply_pending_params() -> Weight { Weight::from_parts(8_000_000, 1500) }
  fn settle_block() -> Weight { Weight::from_parts(65_000_000, 4200) }
  fn process_emission() -> Weight { Weight::from_parts(70_000_000, 4800) }
  fn process_treasury_redirect() -> Weight { Weight::from_parts(60_000_000, 4000) }
}
