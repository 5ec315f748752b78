//! Parameter record and settlement record types.

use alloc::vec;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use polkadot_sdk::frame_support::{BoundedVec, traits::ConstU32};
use polkadot_sdk::sp_runtime::{FixedU128, Perquintill};
use primitives::{ActivityType, Balance, limits, params as defaults};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Bounded activity -> multiplier table.
pub type ActivityMultipliers =
  BoundedVec<ActivityMultiplier, ConstU32<{ limits::MAX_ACTIVITY_ENTRIES }>>;

/// Gas pricing parameters
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct GasParams {
  /// Lowest base fee governance accepts
  pub min_gas_price: FixedU128,
  /// Base fee seeded at genesis
  pub initial_base_fee: FixedU128,
  /// Relative base fee step at full deviation from target
  pub elasticity_multiplier: Perquintill,
  /// Highest priority tip relative to the base fee
  pub max_tip_ratio: Perquintill,
}

impl Default for GasParams {
  fn default() -> Self {
    Self {
      min_gas_price: defaults::MIN_GAS_PRICE,
      initial_base_fee: defaults::INITIAL_BASE_FEE,
      elasticity_multiplier: defaults::ELASTICITY_MULTIPLIER,
      max_tip_ratio: defaults::MAX_TIP_RATIO,
    }
  }
}

/// Utilization thresholds
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct UtilizationParams {
  /// Below this the cool tier applies
  pub cool_threshold: Perquintill,
  /// At or above this the hot tier applies
  pub hot_threshold: Perquintill,
  /// Base fee adjustment target
  pub target: Perquintill,
}

impl Default for UtilizationParams {
  fn default() -> Self {
    Self {
      cool_threshold: defaults::COOL_THRESHOLD,
      hot_threshold: defaults::HOT_THRESHOLD,
      target: defaults::TARGET_UTILIZATION,
    }
  }
}

/// One row of the activity multiplier table
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct ActivityMultiplier {
  pub activity: ActivityType,
  pub multiplier: FixedU128,
}

/// Burn tier rates and activity multipliers
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct BurnParams {
  pub cool_rate: Perquintill,
  pub normal_rate: Perquintill,
  pub hot_rate: Perquintill,
  pub min_multiplier: FixedU128,
  pub max_multiplier: FixedU128,
  pub activity_multipliers: ActivityMultipliers,
}

impl Default for BurnParams {
  fn default() -> Self {
    Self {
      cool_rate: defaults::BURN_COOL,
      normal_rate: defaults::BURN_NORMAL,
      hot_rate: defaults::BURN_HOT,
      min_multiplier: defaults::MIN_MULTIPLIER,
      max_multiplier: defaults::MAX_MULTIPLIER,
      activity_multipliers: BoundedVec::truncate_from(vec![
        ActivityMultiplier {
          activity: ActivityType::StandardGas,
          multiplier: defaults::STANDARD_GAS_MULTIPLIER,
        },
        ActivityMultiplier {
          activity: ActivityType::TokenTransfer,
          multiplier: defaults::TOKEN_TRANSFER_MULTIPLIER,
        },
        ActivityMultiplier {
          activity: ActivityType::SmartContracts,
          multiplier: defaults::SMART_CONTRACTS_MULTIPLIER,
        },
        ActivityMultiplier {
          activity: ActivityType::Messaging,
          multiplier: defaults::MESSAGING_MULTIPLIER,
        },
        ActivityMultiplier {
          activity: ActivityType::Staking,
          multiplier: defaults::STAKING_MULTIPLIER,
        },
        ActivityMultiplier {
          activity: ActivityType::Governance,
          multiplier: defaults::GOVERNANCE_MULTIPLIER,
        },
      ]),
    }
  }
}

/// Split of the non-burned part of a fee
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct DistributionParams {
  pub validator_ratio: Perquintill,
  pub treasury_ratio: Perquintill,
}

impl Default for DistributionParams {
  fn default() -> Self {
    Self {
      validator_ratio: defaults::VALIDATOR_RATIO,
      treasury_ratio: defaults::TREASURY_RATIO,
    }
  }
}

/// Governance-side safety caps, themselves bounded by `limits`
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct SafetyParams {
  pub max_burn_ratio: Perquintill,
  pub min_gas_price_floor: FixedU128,
}

impl Default for SafetyParams {
  fn default() -> Self {
    Self {
      max_burn_ratio: defaults::MAX_BURN_RATIO,
      min_gas_price_floor: defaults::MIN_GAS_PRICE_FLOOR,
    }
  }
}

/// Emission recipient shares
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct EmissionSplit {
  pub staking: Perquintill,
  pub contribution: Perquintill,
  pub sequencer: Perquintill,
  pub treasury: Perquintill,
}

impl Default for EmissionSplit {
  fn default() -> Self {
    Self {
      staking: defaults::STAKING_SHARE,
      contribution: defaults::CONTRIBUTION_SHARE,
      sequencer: defaults::SEQUENCER_SHARE,
      treasury: defaults::EMISSION_TREASURY_SHARE,
    }
  }
}

/// Periodic emission parameters
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct EmissionParams {
  pub enabled: bool,
  /// Blocks between emission runs
  pub epoch_length: u32,
  /// Used to derive the schedule year and per-block provision
  pub blocks_per_year: u32,
  pub inflation_min: Perquintill,
  pub inflation_max: Perquintill,
  pub split: EmissionSplit,
}

impl Default for EmissionParams {
  fn default() -> Self {
    Self {
      enabled: true,
      epoch_length: defaults::EPOCH_LENGTH,
      blocks_per_year: defaults::BLOCKS_PER_YEAR,
      inflation_min: defaults::INFLATION_MIN,
      inflation_max: defaults::INFLATION_MAX,
      split: EmissionSplit::default(),
    }
  }
}

/// Redirect sub-fund allocations
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct RedirectSplit {
  pub development: Perquintill,
  pub ecosystem: Perquintill,
  pub security: Perquintill,
  pub reserve: Perquintill,
}

impl Default for RedirectSplit {
  fn default() -> Self {
    Self {
      development: defaults::DEVELOPMENT_ALLOCATION,
      ecosystem: defaults::ECOSYSTEM_ALLOCATION,
      security: defaults::SECURITY_ALLOCATION,
      reserve: defaults::RESERVE_ALLOCATION,
    }
  }
}

/// Treasury redirect parameters
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct RedirectParams {
  pub enabled: bool,
  /// Share of accumulated treasury inflow moved per execution
  pub ratio: Perquintill,
  /// Minimum blocks between executions
  pub interval: u32,
  pub split: RedirectSplit,
}

impl Default for RedirectParams {
  fn default() -> Self {
    Self {
      enabled: true,
      ratio: defaults::REDIRECT_RATIO,
      interval: defaults::REDIRECT_INTERVAL,
      split: RedirectSplit::default(),
    }
  }
}

/// Warning thresholds; a zero threshold disables the warning
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct TelemetryParams {
  pub high_utilization: Perquintill,
  pub long_block_ms: u64,
}

impl Default for TelemetryParams {
  fn default() -> Self {
    Self {
      high_utilization: defaults::HIGH_UTILIZATION_WARNING,
      long_block_ms: defaults::LONG_BLOCK_WARNING_MS,
    }
  }
}

/// The governance-owned parameter record.
///
/// Only ever replaced wholesale, after [`crate::params::validate`] accepted it.
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct EconomicParams {
  pub gas: GasParams,
  pub utilization: UtilizationParams,
  pub burn: BurnParams,
  pub distribution: DistributionParams,
  pub safety: SafetyParams,
  pub emission: EmissionParams,
  pub redirect: RedirectParams,
  pub telemetry: TelemetryParams,
}

/// Utilization band selecting the base burn rate
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub enum BurnTier {
  #[default]
  Cool,
  Normal,
  Hot,
}

impl BurnTier {
  pub fn name(&self) -> &'static str {
    match self {
      BurnTier::Cool => "cool",
      BurnTier::Normal => "normal",
      BurnTier::Hot => "hot",
    }
  }
}

/// Result of the unified burn calculation.
///
/// `burn_amount + treasury_amount + validator_amount` always equals the fee it was
/// computed for.
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
)]
pub struct BurnCalculation {
  pub activity: ActivityType,
  pub base_rate: Perquintill,
  pub multiplier: FixedU128,
  pub effective_rate: Perquintill,
  pub tier: BurnTier,
  pub burn_amount: Balance,
  pub treasury_amount: Balance,
  pub validator_amount: Balance,
  pub was_capped: bool,
}

impl BurnCalculation {
  pub fn total(&self) -> Option<Balance> {
    crate::fixed::checked_sum(&[self.burn_amount, self.treasury_amount, self.validator_amount])
  }
}

/// Append-only log entry written by every emission run
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub struct EmissionRecord<BlockNumber> {
  pub id: u64,
  pub block_number: BlockNumber,
  pub inflation_rate: Perquintill,
  pub total_emitted: Balance,
  pub staking: Balance,
  pub contribution: Balance,
  pub sequencer: Balance,
  pub treasury: Balance,
  pub capped: bool,
  /// Unix milliseconds; metadata only
  pub timestamp: u64,
}

/// Redirect sub-fund
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub enum SubFund {
  Development,
  Ecosystem,
  Security,
  Reserve,
}

/// Destination accounts of the treasury redirect
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct RedirectTargets<AccountId> {
  pub development: AccountId,
  pub ecosystem: AccountId,
  pub security: AccountId,
  pub reserve: AccountId,
}

impl<AccountId: PartialEq> RedirectTargets<AccountId> {
  pub fn account(&self, fund: SubFund) -> &AccountId {
    match fund {
      SubFund::Development => &self.development,
      SubFund::Ecosystem => &self.ecosystem,
      SubFund::Security => &self.security,
      SubFund::Reserve => &self.reserve,
    }
  }

  /// True when no two funds share an account and none is `other`.
  pub fn distinct_from(&self, other: Option<&AccountId>) -> bool {
    let accounts = [&self.development, &self.ecosystem, &self.security, &self.reserve];
    for (i, a) in accounts.iter().enumerate() {
      if accounts.iter().skip(i + 1).any(|b| a == b) {
        return false;
      }
      if other.is_some_and(|o| *a == o) {
        return false;
      }
    }
    true
  }
}

/// Pipeline stage reported when a settlement unit rolls back
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub enum SettlementStage {
  BlockFees,
  Emission,
  TreasuryRedirect,
}

/// Base fee query result
#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct GasPriceInfo {
  pub base_fee: FixedU128,
  pub min_gas_price: FixedU128,
  /// `max(base_fee, min_gas_price, floor)`
  pub effective_gas_price: FixedU128,
  pub max_tip: FixedU128,
}

#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct UtilizationInfo {
  pub current: Perquintill,
  pub previous: Perquintill,
}

#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct BurnTierInfo {
  pub tier: BurnTier,
  pub base_rate: Perquintill,
  pub utilization: Perquintill,
}

/// Cumulative fee counters
#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct FeeStatistics {
  pub total_burned: Balance,
  pub total_to_treasury: Balance,
  pub total_to_validators: Balance,
}

/// Snapshot of the treasury redirect state
#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct RedirectState<AccountId, BlockNumber> {
  pub accumulated_inflow: Balance,
  pub last_execution: BlockNumber,
  pub total_redirected: Balance,
  pub targets: Option<RedirectTargets<AccountId>>,
}
