use crate as pallet_economics;
use crate::{BlockGasMeter, EconomicParams, GasMetrics, RedirectTargets};
use core::time::Duration;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl, parameter_types,
  traits::{ConstU64, ConstU128, Get, UnixTime},
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{ActivityType, pallet_ids::FEE_COLLECTOR_PALLET_ID};
use std::cell::RefCell;

pub const ALICE: u64 = 1;
pub const TREASURY: u64 = 10;
pub const STAKING_POOL: u64 = 20;
pub const CONTRIBUTION_POOL: u64 = 21;
pub const SEQUENCER_POOL: u64 = 22;
pub const DEVELOPMENT_FUND: u64 = 30;
pub const ECOSYSTEM_FUND: u64 = 31;
pub const SECURITY_FUND: u64 = 32;
pub const RESERVE_FUND: u64 = 33;

pub const ALICE_BALANCE: u128 = 1_000_000_000_000_000;
pub const TREASURY_BALANCE: u128 = 10_000_000_000;

// Host inputs
thread_local! {
  pub static GAS_METRICS: RefCell<Option<GasMetrics>> = const { RefCell::new(None) };
  pub static EXECUTION_TIME_MS: RefCell<Option<u64>> = const { RefCell::new(None) };
  pub static NOW_MS: RefCell<u64> = const { RefCell::new(0) };
  pub static MAX_SUPPLY: RefCell<u128> = const { RefCell::new(u128::MAX) };
}

pub fn set_gas_metrics(gas_used: u64, max_block_gas: u64) {
  GAS_METRICS.with(|m| {
    *m.borrow_mut() = Some(GasMetrics {
      gas_used,
      max_block_gas,
    })
  });
}

pub fn clear_gas_metrics() {
  GAS_METRICS.with(|m| *m.borrow_mut() = None);
}

pub fn set_execution_time_ms(ms: u64) {
  EXECUTION_TIME_MS.with(|t| *t.borrow_mut() = Some(ms));
}

pub fn set_now_ms(ms: u64) {
  NOW_MS.with(|t| *t.borrow_mut() = ms);
}

pub fn set_max_supply(max: u128) {
  MAX_SUPPLY.with(|m| *m.borrow_mut() = max);
}

pub struct MockGasMeter;
impl BlockGasMeter for MockGasMeter {
  fn gas_metrics() -> Option<GasMetrics> {
    GAS_METRICS.with(|m| *m.borrow())
  }

  fn execution_time_ms() -> Option<u64> {
    EXECUTION_TIME_MS.with(|t| *t.borrow())
  }
}

pub struct MockTime;
impl UnixTime for MockTime {
  fn now() -> Duration {
    Duration::from_millis(NOW_MS.with(|t| *t.borrow()))
  }
}

pub struct MockMaxSupply;
impl Get<u128> for MockMaxSupply {
  fn get() -> u128 {
    MAX_SUPPLY.with(|m| *m.borrow())
  }
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Economics: pallet_economics,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = u128;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

parameter_types! {
  pub const EconomicsPalletId: PalletId = PalletId(*FEE_COLLECTOR_PALLET_ID);
  pub const DefaultActivity: ActivityType = ActivityType::StandardGas;
}

impl pallet_economics::Config for Test {
  type Currency = Balances;
  type AdminOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type PalletId = EconomicsPalletId;
  type GasMeter = MockGasMeter;
  type UnixTime = MockTime;
  type StakingRewardsAccount = ConstU64<STAKING_POOL>;
  type ContributionRewardsAccount = ConstU64<CONTRIBUTION_POOL>;
  type SequencerRewardsAccount = ConstU64<SEQUENCER_POOL>;
  type MaxSupply = MockMaxSupply;
  type DefaultActivity = DefaultActivity;
  type WeightInfo = ();
}

pub fn redirect_targets() -> RedirectTargets<u64> {
  RedirectTargets {
    development: DEVELOPMENT_FUND,
    ecosystem: ECOSYSTEM_FUND,
    security: SECURITY_FUND,
    reserve: RESERVE_FUND,
  }
}

pub struct ExtBuilder {
  params: EconomicParams,
  treasury: Option<u64>,
  targets: Option<RedirectTargets<u64>>,
}

impl Default for ExtBuilder {
  fn default() -> Self {
    Self {
      params: EconomicParams::default(),
      treasury: Some(TREASURY),
      targets: Some(redirect_targets()),
    }
  }
}

impl ExtBuilder {
  pub fn params(mut self, params: EconomicParams) -> Self {
    self.params = params;
    self
  }

  pub fn without_treasury(mut self) -> Self {
    self.treasury = None;
    self
  }

  pub fn without_redirect_targets(mut self) -> Self {
    self.targets = None;
    self
  }

  pub fn build(self) -> polkadot_sdk::sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default()
      .build_storage()
      .unwrap();

    polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
      balances: vec![(ALICE, ALICE_BALANCE), (TREASURY, TREASURY_BALANCE)],
      ..Default::default()
    }
    .assimilate_storage(&mut t)
    .unwrap();

    pallet_economics::GenesisConfig::<Test> {
      params: self.params,
      treasury_account: self.treasury,
      redirect_targets: self.targets,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    // Reset host inputs
    clear_gas_metrics();
    EXECUTION_TIME_MS.with(|t| *t.borrow_mut() = None);
    set_now_ms(0);
    set_max_supply(u128::MAX);

    let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
    ext.execute_with(|| System::set_block_number(1));
    ext
  }
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  ExtBuilder::default().build()
}
