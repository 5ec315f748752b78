//! Ecosystem Constants for the Settlement Engine
//!
//! This module centralizes all system-level constants: pallet IDs used to derive
//! module-owned accounts, the hard protocol limits that governance can never
//! override, and the default economic parameters installed at genesis.
//!
//! These constants are the single source of truth and are re-used by the pallet,
//! its mock runtime and any runtime wiring it.

use sp_arithmetic::{FixedU128, Perquintill};

/// Balance type alias for consistency across ecosystem
pub type Balance = u128;

/// Fixed-point unit (10^18); `FixedU128` and `Perquintill` both use this scale.
pub const DECIMAL_ONE: u128 = 1_000_000_000_000_000_000;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// These IDs are used by Polkadot SDK's `PalletId::into_account_truncating()`
/// to deterministically generate accounts for pallet-specific operations.
pub mod pallet_ids {
  /// Fee collector: the ante-handler deposits fees here, validator share stays here
  pub const FEE_COLLECTOR_PALLET_ID: &[u8; 8] = b"py/feecl";
}

/// Hard protocol limits.
///
/// Checked twice: parameter validation rejects any update exceeding them, and every
/// computation clamps against them again regardless of what is stored.
pub mod limits {
  use sp_arithmetic::{FixedU128, Perquintill};

  /// Absolute ceiling on the effective burn rate (50%).
  pub const MAX_BURN_RATE: Perquintill = Perquintill::from_percent(50);

  /// Absolute ceiling on annual inflation (3%).
  pub const MAX_INFLATION_RATE: Perquintill = Perquintill::from_percent(3);

  /// Absolute ceiling on the share of treasury inflow redirected per interval (10%).
  pub const MAX_REDIRECT_RATIO: Perquintill = Perquintill::from_percent(10);

  /// No single emission recipient may receive more than 60%.
  pub const MAX_EMISSION_SHARE: Perquintill = Perquintill::from_percent(60);

  /// Staking must always receive at least 20% of emission.
  pub const MIN_STAKING_SHARE: Perquintill = Perquintill::from_percent(20);

  /// Upper bound for any activity multiplier (10x).
  pub const MAX_ACTIVITY_MULTIPLIER: FixedU128 = FixedU128::from_inner(10 * super::DECIMAL_ONE);

  /// Maximum number of entries in the activity multiplier table.
  pub const MAX_ACTIVITY_ENTRIES: u32 = 16;

  /// Maximum emission records returned by one paginated query.
  pub const MAX_PAGE_SIZE: u32 = 100;
}

/// Year-indexed inflation schedule: 3.00% decaying to a 0.50% terminal rate.
///
/// Index `n` applies to the n-th year since genesis; years past the end keep the
/// last entry.
pub const INFLATION_SCHEDULE: [Perquintill; 6] = [
  Perquintill::from_parts(30_000_000_000_000_000), // 3.00%
  Perquintill::from_parts(25_000_000_000_000_000), // 2.50%
  Perquintill::from_parts(20_000_000_000_000_000), // 2.00%
  Perquintill::from_parts(15_000_000_000_000_000), // 1.50%
  Perquintill::from_parts(10_000_000_000_000_000), // 1.00%
  Perquintill::from_parts(5_000_000_000_000_000),  // 0.50%
];

/// Default economic parameters installed at genesis.
pub mod params {
  use super::*;

  /// Minimum gas price governance may configure (0.01 per gas unit).
  pub const MIN_GAS_PRICE: FixedU128 = FixedU128::from_inner(DECIMAL_ONE / 100);

  /// Base fee at genesis (1.0 per gas unit).
  pub const INITIAL_BASE_FEE: FixedU128 = FixedU128::from_inner(DECIMAL_ONE);

  /// Maximum per-block base fee change at full deviation from target (12.5%).
  pub const ELASTICITY_MULTIPLIER: Perquintill = Perquintill::from_parts(125_000_000_000_000_000);

  /// Maximum priority tip relative to the base fee (10%).
  pub const MAX_TIP_RATIO: Perquintill = Perquintill::from_percent(10);

  /// Safety floor under the base fee (0.001 per gas unit).
  pub const MIN_GAS_PRICE_FLOOR: FixedU128 = FixedU128::from_inner(DECIMAL_ONE / 1_000);

  /// Utilization below which the cool tier applies.
  pub const COOL_THRESHOLD: Perquintill = Perquintill::from_percent(30);

  /// Utilization at or above which the hot tier applies.
  pub const HOT_THRESHOLD: Perquintill = Perquintill::from_percent(70);

  /// Base fee adjustment target.
  pub const TARGET_UTILIZATION: Perquintill = Perquintill::from_percent(50);

  /// Tier burn rates.
  pub const BURN_COOL: Perquintill = Perquintill::from_percent(10);
  pub const BURN_NORMAL: Perquintill = Perquintill::from_percent(20);
  pub const BURN_HOT: Perquintill = Perquintill::from_percent(40);

  /// Activity multiplier bounds.
  pub const MIN_MULTIPLIER: FixedU128 = FixedU128::from_inner(DECIMAL_ONE / 2);
  pub const MAX_MULTIPLIER: FixedU128 = FixedU128::from_inner(2 * DECIMAL_ONE);

  /// Default activity multipliers.
  pub const STANDARD_GAS_MULTIPLIER: FixedU128 = FixedU128::from_inner(DECIMAL_ONE);
  pub const TOKEN_TRANSFER_MULTIPLIER: FixedU128 = FixedU128::from_inner(DECIMAL_ONE);
  pub const SMART_CONTRACTS_MULTIPLIER: FixedU128 = FixedU128::from_inner(3 * DECIMAL_ONE / 2);
  pub const MESSAGING_MULTIPLIER: FixedU128 = FixedU128::from_inner(DECIMAL_ONE / 2);
  pub const STAKING_MULTIPLIER: FixedU128 = FixedU128::from_inner(3 * DECIMAL_ONE / 4);
  pub const GOVERNANCE_MULTIPLIER: FixedU128 = FixedU128::from_inner(DECIMAL_ONE / 2);

  /// Split of the non-burned fee.
  pub const VALIDATOR_RATIO: Perquintill = Perquintill::from_percent(70);
  pub const TREASURY_RATIO: Perquintill = Perquintill::from_percent(30);

  /// Configured burn ceiling (must stay at or below `limits::MAX_BURN_RATE`).
  pub const MAX_BURN_RATIO: Perquintill = Perquintill::from_percent(50);

  /// Emission split.
  pub const STAKING_SHARE: Perquintill = Perquintill::from_percent(40);
  pub const CONTRIBUTION_SHARE: Perquintill = Perquintill::from_percent(30);
  pub const SEQUENCER_SHARE: Perquintill = Perquintill::from_percent(20);
  pub const EMISSION_TREASURY_SHARE: Perquintill = Perquintill::from_percent(10);

  /// Inflation bounds.
  pub const INFLATION_MIN: Perquintill = Perquintill::from_parts(5_000_000_000_000_000); // 0.5%
  pub const INFLATION_MAX: Perquintill = Perquintill::from_percent(3);

  /// Emission epoch length in blocks.
  pub const EPOCH_LENGTH: u32 = 100;

  /// Blocks per year at 6 second blocks.
  pub const BLOCKS_PER_YEAR: u32 = 5_256_000;

  /// Redirect ratio and cadence (one day at 6 second blocks).
  pub const REDIRECT_RATIO: Perquintill = Perquintill::from_percent(10);
  pub const REDIRECT_INTERVAL: u32 = 14_400;

  /// Redirect sub-fund allocations.
  pub const DEVELOPMENT_ALLOCATION: Perquintill = Perquintill::from_percent(40);
  pub const ECOSYSTEM_ALLOCATION: Perquintill = Perquintill::from_percent(30);
  pub const SECURITY_ALLOCATION: Perquintill = Perquintill::from_percent(20);
  pub const RESERVE_ALLOCATION: Perquintill = Perquintill::from_percent(10);

  /// Telemetry thresholds.
  pub const HIGH_UTILIZATION_WARNING: Perquintill = Perquintill::from_percent(90);
  pub const LONG_BLOCK_WARNING_MS: u64 = 2_000;
}
