//! Economics Pallet
//!
//! Deterministic end-of-block economic settlement:
//! - splits collected fees into burn, treasury and validator shares through a
//!   single burn calculation driven by block utilization and activity type,
//! - moves the base fee toward target utilization,
//! - mints per-epoch emission on a decaying inflation schedule under a supply cap,
//! - redirects a capped share of treasury inflow to four sub-funds.
//!
//! Every settlement unit runs inside its own storage layer: either all of its
//! ledger and storage mutations land, or none do.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod base_fee;
pub mod burn;
pub mod emission;
pub mod error;
pub mod fixed;
pub mod params;
pub mod redirect;
pub mod telemetry;
pub mod types;
pub mod utilization;

pub use error::SettlementError;
pub use params::{ErrorKind, ParamsError};
pub use types::*;
pub use utilization::{BlockGasMeter, GasMetrics, SystemWeightMeter};

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

/// Log target of this pallet
pub const LOG_TARGET: &str = "runtime::economics";

#[frame::pallet]
pub mod pallet {
  use super::{
    LOG_TARGET, ParamsError, SettlementError, WeightInfo, base_fee, burn, emission, redirect, telemetry,
    telemetry::TelemetryWarning,
    types::*,
    utilization::{self, BlockGasMeter},
  };
  use alloc::vec::Vec;
  use frame::deps::{
    frame_support::{
      storage::with_storage_layer,
      traits::{
        UnixTime,
        fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
        tokens::{Fortitude, Precision, Preservation},
      },
    },
    sp_runtime::{
      DispatchError, FixedU128, Perquintill,
      traits::{AccountIdConversion, SaturatedConversion, Saturating, Zero},
    },
  };
  use frame::prelude::*;
  use primitives::{ActivityType, Balance, limits};

  /// Configuration trait for the economics pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Native currency; the only path through which balances change
    type Currency: NativeInspect<Self::AccountId, Balance = Balance>
      + NativeMutate<Self::AccountId, Balance = Balance>;

    /// Origin allowed to update parameters and settlement accounts
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Pallet ID of the fee collector account
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Live block metrics from the execution host
    type GasMeter: BlockGasMeter;

    /// Clock used to timestamp emission records
    type UnixTime: UnixTime;

    /// Staking rewards pool receiving the staking emission share
    #[pallet::constant]
    type StakingRewardsAccount: Get<Self::AccountId>;

    /// Contribution rewards pool
    #[pallet::constant]
    type ContributionRewardsAccount: Get<Self::AccountId>;

    /// Sequencer rewards pool
    #[pallet::constant]
    type SequencerRewardsAccount: Get<Self::AccountId>;

    /// Global supply cap; emission never mints past it
    #[pallet::constant]
    type MaxSupply: Get<Balance>;

    /// Activity the aggregate block fee is attributed to
    #[pallet::constant]
    type DefaultActivity: Get<ActivityType>;

    /// Weight information for extrinsics and hooks
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  #[pallet::type_value]
  pub fn DefaultBaseFee() -> FixedU128 {
    primitives::params::INITIAL_BASE_FEE
  }

  /// Parameters in force for the current block
  #[pallet::storage]
  #[pallet::getter(fn params)]
  pub type Params<T: Config> = StorageValue<_, EconomicParams, ValueQuery>;

  /// Accepted update waiting for the next block
  #[pallet::storage]
  #[pallet::getter(fn pending_params)]
  pub type PendingParams<T: Config> = StorageValue<_, EconomicParams, OptionQuery>;

  /// Base fee per gas unit
  #[pallet::storage]
  #[pallet::getter(fn base_fee)]
  pub type CurrentBaseFee<T: Config> = StorageValue<_, FixedU128, ValueQuery, DefaultBaseFee>;

  /// Utilization of the last finalized block
  #[pallet::storage]
  #[pallet::getter(fn previous_utilization)]
  pub type PreviousBlockUtilization<T: Config> = StorageValue<_, Perquintill, ValueQuery>;

  /// Tier applied by the last fee settlement
  #[pallet::storage]
  #[pallet::getter(fn last_burn_tier)]
  pub type LastBurnTier<T: Config> = StorageValue<_, BurnTier, ValueQuery>;

  #[pallet::storage]
  #[pallet::getter(fn total_burned)]
  pub type TotalBurned<T: Config> = StorageValue<_, Balance, ValueQuery>;

  #[pallet::storage]
  #[pallet::getter(fn total_to_treasury)]
  pub type TotalToTreasury<T: Config> = StorageValue<_, Balance, ValueQuery>;

  #[pallet::storage]
  #[pallet::getter(fn total_to_validators)]
  pub type TotalToValidators<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Treasury receiving fee and emission shares; settlement fails closed while unset
  #[pallet::storage]
  #[pallet::getter(fn treasury_account)]
  pub type TreasuryAccount<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Sub-fund accounts of the treasury redirect
  #[pallet::storage]
  #[pallet::getter(fn redirect_targets)]
  pub type RedirectTargetAccounts<T: Config> =
    StorageValue<_, RedirectTargets<T::AccountId>, OptionQuery>;

  /// Treasury inflow since the last redirect
  #[pallet::storage]
  pub type RedirectAccumulatedInflow<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Block of the last redirect
  #[pallet::storage]
  pub type RedirectLastExecution<T: Config> = StorageValue<_, BlockNumberFor<T>, ValueQuery>;

  /// All-time redirected amount
  #[pallet::storage]
  pub type TotalRedirected<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Append-only emission log
  #[pallet::storage]
  pub type EmissionRecords<T: Config> =
    StorageMap<_, Twox64Concat, u64, EmissionRecord<BlockNumberFor<T>>, OptionQuery>;

  #[pallet::storage]
  pub type NextEmissionRecordId<T: Config> = StorageValue<_, u64, ValueQuery>;

  /// Last block already emitted for; epochs past it are still owed
  #[pallet::storage]
  pub type LastEmissionBlock<T: Config> = StorageValue<_, BlockNumberFor<T>, ValueQuery>;

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    pub params: EconomicParams,
    pub treasury_account: Option<T::AccountId>,
    pub redirect_targets: Option<RedirectTargets<T::AccountId>>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      if let Err(e) = crate::params::validate(&self.params) {
        panic!("invalid genesis economic params: {}", e.as_str());
      }
      Params::<T>::put(&self.params);
      CurrentBaseFee::<T>::put(self.params.gas.initial_base_fee);
      if let Some(targets) = &self.redirect_targets {
        assert!(
          targets.distinct_from(self.treasury_account.as_ref()),
          "redirect targets must be four distinct non-treasury accounts"
        );
        RedirectTargetAccounts::<T>::put(targets);
      }
      if let Some(treasury) = &self.treasury_account {
        TreasuryAccount::<T>::put(treasury);
        frame_system::Pallet::<T>::inc_providers(treasury);
      }
      // Settlement accounts survive a zero balance between blocks
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
      frame_system::Pallet::<T>::inc_providers(&T::StakingRewardsAccount::get());
      frame_system::Pallet::<T>::inc_providers(&T::ContributionRewardsAccount::get());
      frame_system::Pallet::<T>::inc_providers(&T::SequencerRewardsAccount::get());
    }
  }

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Block fees settled
    FeesProcessed {
      total_fee: Balance,
      burned: Balance,
      to_treasury: Balance,
      to_validators: Balance,
      utilization: Perquintill,
      tier: BurnTier,
    },
    /// Tier applied to this block's fees; `previous` equals `tier` when unchanged
    BurnTierChanged {
      previous: BurnTier,
      tier: BurnTier,
      base_rate: Perquintill,
      utilization: Perquintill,
    },
    /// Treasury share of block fees transferred
    TreasuryTransfer { to: T::AccountId, amount: Balance },
    /// Unified burn applied
    UnifiedBurn {
      activity: ActivityType,
      tier: BurnTier,
      base_rate: Perquintill,
      multiplier: FixedU128,
      effective_rate: Perquintill,
      amount: Balance,
      was_capped: bool,
    },
    /// Epoch emission minted
    EmissionProcessed {
      record_id: u64,
      inflation_rate: Perquintill,
      total: Balance,
      staking: Balance,
      contribution: Balance,
      sequencer: Balance,
      treasury: Balance,
    },
    /// Epoch emission clamped to the supply cap
    EmissionCapped {
      requested: Balance,
      emitted: Balance,
      max_supply: Balance,
    },
    /// Treasury redirect executed
    TreasuryRedirected {
      inflow: Balance,
      ratio: Perquintill,
      amount: Balance,
      distributed: Balance,
      retained: Balance,
    },
    /// One sub-fund transfer of a redirect
    TreasuryAllocation {
      fund: SubFund,
      to: T::AccountId,
      amount: Balance,
    },
    HighUtilizationWarning {
      utilization: Perquintill,
      threshold: Perquintill,
    },
    LongBlockExecutionWarning { elapsed_ms: u64, threshold_ms: u64 },
    /// Parameter update accepted, effective from `effective_from`
    ParamsScheduled { effective_from: BlockNumberFor<T> },
    /// Pending parameters now in force
    ParamsApplied { block_number: BlockNumberFor<T> },
    TreasuryAccountSet { account: T::AccountId },
    RedirectTargetsSet { targets: RedirectTargets<T::AccountId> },
    /// A settlement unit failed and was rolled back
    SettlementFailed {
      stage: SettlementStage,
      error: DispatchError,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Treasury account is not configured
    TreasuryAccountNotSet,
    /// Redirect sub-fund accounts are not configured
    RedirectTargetsNotSet,
    /// Redirect targets must be four distinct accounts other than the treasury
    DuplicateRedirectTarget,
    /// A split did not sum to its input
    ConservationViolation,
    /// Arithmetic overflow occurred
    ArithmeticOverflow,
    /// A computed rate escaped its hard ceiling
    ProtocolCapViolation,
    /// Tier burn rate above the hard burn cap
    BurnRateAboveCap,
    /// Configured max burn ratio above the hard burn cap
    MaxBurnRatioAboveCap,
    /// Inflation bound above the hard inflation cap
    InflationAboveCap,
    /// Redirect ratio above the hard redirect cap
    RedirectRatioAboveCap,
    /// An emission share above the per-recipient cap
    EmissionShareAboveCap,
    /// Staking share below its floor
    StakingShareBelowFloor,
    /// Multiplier bound above the hard multiplier cap
    MultiplierAboveCap,
    /// Tier rates must satisfy cool <= normal <= hot
    TierRatesNotMonotonic,
    /// Cool threshold must be below hot threshold
    ThresholdsNotOrdered,
    /// Target utilization must be positive
    ZeroTargetUtilization,
    /// Min multiplier above max multiplier
    MultiplierBoundsInverted,
    /// An activity multiplier outside its bounds
    MultiplierOutOfBounds,
    /// Activity listed twice in the multiplier table
    DuplicateActivity,
    /// Multiplier table lacks the standard gas baseline
    MissingBaselineActivity,
    /// Validator and treasury ratios must sum to one
    FeeSplitNotWhole,
    /// Emission shares must sum to one
    EmissionSplitNotWhole,
    /// Redirect allocations must sum to one
    RedirectSplitNotWhole,
    /// Inflation min above inflation max
    InflationBoundsInverted,
    ZeroEpochLength,
    ZeroBlocksPerYear,
    ZeroRedirectInterval,
    ZeroGasPriceFloor,
    /// Initial base fee below the minimum gas price or floor
    InitialBaseFeeBelowMinimum,
  }

  impl<T> From<ParamsError> for Error<T> {
    fn from(e: ParamsError) -> Self {
      match e {
        ParamsError::BurnRateAboveCap => Error::<T>::BurnRateAboveCap,
        ParamsError::MaxBurnRatioAboveCap => Error::<T>::MaxBurnRatioAboveCap,
        ParamsError::InflationAboveCap => Error::<T>::InflationAboveCap,
        ParamsError::RedirectRatioAboveCap => Error::<T>::RedirectRatioAboveCap,
        ParamsError::EmissionShareAboveCap => Error::<T>::EmissionShareAboveCap,
        ParamsError::StakingShareBelowFloor => Error::<T>::StakingShareBelowFloor,
        ParamsError::MultiplierAboveCap => Error::<T>::MultiplierAboveCap,
        ParamsError::TierRatesNotMonotonic => Error::<T>::TierRatesNotMonotonic,
        ParamsError::ThresholdsNotOrdered => Error::<T>::ThresholdsNotOrdered,
        ParamsError::ZeroTargetUtilization => Error::<T>::ZeroTargetUtilization,
        ParamsError::MultiplierBoundsInverted => Error::<T>::MultiplierBoundsInverted,
        ParamsError::MultiplierOutOfBounds => Error::<T>::MultiplierOutOfBounds,
        ParamsError::DuplicateActivity => Error::<T>::DuplicateActivity,
        ParamsError::MissingBaselineActivity => Error::<T>::MissingBaselineActivity,
        ParamsError::FeeSplitNotWhole => Error::<T>::FeeSplitNotWhole,
        ParamsError::EmissionSplitNotWhole => Error::<T>::EmissionSplitNotWhole,
        ParamsError::RedirectSplitNotWhole => Error::<T>::RedirectSplitNotWhole,
        ParamsError::InflationBoundsInverted => Error::<T>::InflationBoundsInverted,
        ParamsError::ZeroEpochLength => Error::<T>::ZeroEpochLength,
        ParamsError::ZeroBlocksPerYear => Error::<T>::ZeroBlocksPerYear,
        ParamsError::ZeroRedirectInterval => Error::<T>::ZeroRedirectInterval,
        ParamsError::ZeroGasPriceFloor => Error::<T>::ZeroGasPriceFloor,
        ParamsError::InitialBaseFeeBelowMinimum => Error::<T>::InitialBaseFeeBelowMinimum,
      }
    }
  }

  impl<T> From<SettlementError> for Error<T> {
    fn from(e: SettlementError) -> Self {
      match e {
        SettlementError::ConservationViolation => Error::<T>::ConservationViolation,
        SettlementError::ArithmeticOverflow => Error::<T>::ArithmeticOverflow,
        SettlementError::ProtocolCapViolation => Error::<T>::ProtocolCapViolation,
        SettlementError::InvalidParams(e) => e.into(),
      }
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Schedule a new parameter set (governance only).
    ///
    /// The set is validated in full; on success it takes effect at the start of
    /// the next block. A rejected set leaves stored parameters untouched.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::update_params())]
    pub fn update_params(origin: OriginFor<T>, new_params: EconomicParams) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      if let Err(e) = crate::params::validate(&new_params) {
        log::warn!(
          target: LOG_TARGET,
          "rejected parameter update: {} ({:?})",
          e.as_str(),
          e.kind()
        );
        return Err(Error::<T>::from(e).into());
      }
      PendingParams::<T>::put(new_params);
      let effective_from = frame_system::Pallet::<T>::block_number().saturating_add(1u32.into());
      Self::deposit_event(Event::ParamsScheduled { effective_from });
      Ok(())
    }

    /// Set the treasury account (governance only)
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_treasury_account())]
    pub fn set_treasury_account(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      if let Some(targets) = RedirectTargetAccounts::<T>::get() {
        ensure!(
          targets.distinct_from(Some(&account)),
          Error::<T>::DuplicateRedirectTarget
        );
      }
      if TreasuryAccount::<T>::get().as_ref() != Some(&account) {
        frame_system::Pallet::<T>::inc_providers(&account);
      }
      TreasuryAccount::<T>::put(&account);
      Self::deposit_event(Event::TreasuryAccountSet { account });
      Ok(())
    }

    /// Set the four redirect sub-fund accounts (governance only)
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_redirect_targets())]
    pub fn set_redirect_targets(
      origin: OriginFor<T>,
      targets: RedirectTargets<T::AccountId>,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(
        targets.distinct_from(TreasuryAccount::<T>::get().as_ref()),
        Error::<T>::DuplicateRedirectTarget
      );
      RedirectTargetAccounts::<T>::put(&targets);
      Self::deposit_event(Event::RedirectTargetsSet { targets });
      Ok(())
    }
  }

  #[pallet::hooks]
  impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
    fn on_initialize(n: BlockNumberFor<T>) -> Weight {
      let mut weight = T::DbWeight::get().reads(1);
      if let Some(pending) = PendingParams::<T>::take() {
        // Blocks spent disabled are never owed emission
        if pending.emission.enabled && !Params::<T>::get().emission.enabled {
          LastEmissionBlock::<T>::put(n);
        }
        Params::<T>::put(pending);
        Self::deposit_event(Event::ParamsApplied { block_number: n });
        weight = weight.saturating_add(T::WeightInfo::apply_pending_params());
      }

      // Reserve what on_finalize may consume
      let params = Params::<T>::get();
      weight = weight
        .saturating_add(T::DbWeight::get().reads(2))
        .saturating_add(T::WeightInfo::settle_block());
      if Self::emission_owed(&params, n).is_some() {
        weight = weight.saturating_add(T::WeightInfo::process_emission());
      }
      if Self::redirect_interval_elapsed(&params, n) {
        weight = weight.saturating_add(T::WeightInfo::process_treasury_redirect());
      }
      weight
    }

    fn on_finalize(n: BlockNumberFor<T>) {
      Self::settle_block(n);
    }

    #[cfg(feature = "try-runtime")]
    fn try_state(_n: BlockNumberFor<T>) -> Result<(), frame::deps::sp_runtime::TryRuntimeError> {
      let params = Params::<T>::get();
      crate::params::validate(&params).map_err(|e| e.as_str())?;
      ensure!(
        CurrentBaseFee::<T>::get() >= crate::params::base_fee_floor(&params),
        "base fee below floor"
      );
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Fee collector account; fees accrue here and the validator share stays here
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// End-of-block pipeline in its fixed order.
    ///
    /// A failing unit is rolled back and reported, and the units after it do not
    /// run this block. Owed emission and redirects stay owed and settle in a
    /// later block.
    pub fn settle_block(now: BlockNumberFor<T>) {
      let params = Params::<T>::get();
      let utilization = Self::current_utilization();

      if let Err(error) = Self::process_block_fees(&params, utilization) {
        Self::report_failure(SettlementStage::BlockFees, error);
        return;
      }

      let base_fee = base_fee::next_base_fee(CurrentBaseFee::<T>::get(), utilization, &params);
      CurrentBaseFee::<T>::put(base_fee);
      PreviousBlockUtilization::<T>::put(utilization);

      if Self::emission_owed(&params, now).is_some() {
        if let Err(error) = Self::process_emission(&params, now) {
          Self::report_failure(SettlementStage::Emission, error);
          return;
        }
      }

      let last: u64 = RedirectLastExecution::<T>::get().saturated_into();
      if redirect::is_due(
        &params.redirect,
        now.saturated_into(),
        last,
        RedirectAccumulatedInflow::<T>::get(),
      ) {
        if let Err(error) = Self::process_treasury_redirect(&params, now) {
          Self::report_failure(SettlementStage::TreasuryRedirect, error);
          return;
        }
      }

      Self::report_telemetry(&params, utilization);
    }

    /// Settles the fee collector balance. `Ok(None)` when there was nothing to settle.
    pub fn process_block_fees(
      params: &EconomicParams,
      utilization: Perquintill,
    ) -> Result<Option<BurnCalculation>, DispatchError> {
      with_storage_layer(|| Self::do_process_block_fees(params, utilization))
    }

    /// Mints the emission owed at `now` and appends its record. `Ok(None)` when
    /// nothing is owed.
    pub fn process_emission(
      params: &EconomicParams,
      now: BlockNumberFor<T>,
    ) -> Result<Option<EmissionRecord<BlockNumberFor<T>>>, DispatchError> {
      with_storage_layer(|| Self::do_process_emission(params, now))
    }

    /// Redirects the accumulated treasury inflow. `Ok(None)` when nothing accumulated.
    pub fn process_treasury_redirect(
      params: &EconomicParams,
      now: BlockNumberFor<T>,
    ) -> Result<Option<redirect::RedirectPlan>, DispatchError> {
      with_storage_layer(|| Self::do_process_treasury_redirect(params, now))
    }

    fn do_process_block_fees(
      params: &EconomicParams,
      utilization: Perquintill,
    ) -> Result<Option<BurnCalculation>, DispatchError> {
      let collector = Self::account_id();
      let total_fee = T::Currency::balance(&collector);
      if total_fee.is_zero() {
        return Ok(None);
      }
      let calc = burn::compute(params, utilization, total_fee, T::DefaultActivity::get())
        .map_err(Self::settlement_error)?;
      let calc = burn::reclamp(calc, params.safety.max_burn_ratio, &params.distribution)
        .map_err(Self::settlement_error)?;
      if calc.effective_rate > limits::MAX_BURN_RATE {
        return Err(Self::settlement_error(SettlementError::ProtocolCapViolation));
      }

      if !calc.burn_amount.is_zero() {
        T::Currency::burn_from(
          &collector,
          calc.burn_amount,
          Preservation::Expendable,
          Precision::Exact,
          Fortitude::Polite,
        )?;
      }
      if !calc.treasury_amount.is_zero() {
        let treasury = Self::require_treasury()?;
        T::Currency::transfer(
          &collector,
          &treasury,
          calc.treasury_amount,
          Preservation::Expendable,
        )?;
        Self::deposit_event(Event::TreasuryTransfer {
          to: treasury,
          amount: calc.treasury_amount,
        });
      }

      TotalBurned::<T>::mutate(|total| *total = total.saturating_add(calc.burn_amount));
      TotalToTreasury::<T>::mutate(|total| *total = total.saturating_add(calc.treasury_amount));
      TotalToValidators::<T>::mutate(|total| *total = total.saturating_add(calc.validator_amount));
      RedirectAccumulatedInflow::<T>::mutate(|inflow| {
        *inflow = inflow.saturating_add(calc.treasury_amount)
      });
      let previous = LastBurnTier::<T>::mutate(|tier| core::mem::replace(tier, calc.tier));
      log::debug!(
        target: LOG_TARGET,
        "settled {} fee as {} at {} tier: burned {}, treasury {}, validators {}",
        total_fee,
        calc.activity.as_str(),
        calc.tier.name(),
        calc.burn_amount,
        calc.treasury_amount,
        calc.validator_amount
      );

      Self::deposit_event(Event::UnifiedBurn {
        activity: calc.activity,
        tier: calc.tier,
        base_rate: calc.base_rate,
        multiplier: calc.multiplier,
        effective_rate: calc.effective_rate,
        amount: calc.burn_amount,
        was_capped: calc.was_capped,
      });
      Self::deposit_event(Event::FeesProcessed {
        total_fee,
        burned: calc.burn_amount,
        to_treasury: calc.treasury_amount,
        to_validators: calc.validator_amount,
        utilization,
        tier: calc.tier,
      });
      Self::deposit_event(Event::BurnTierChanged {
        previous,
        tier: calc.tier,
        base_rate: calc.base_rate,
        utilization,
      });
      Ok(Some(calc))
    }

    fn do_process_emission(
      params: &EconomicParams,
      now: BlockNumberFor<T>,
    ) -> Result<Option<EmissionRecord<BlockNumberFor<T>>>, DispatchError> {
      let Some(blocks) = Self::emission_owed(params, now) else {
        return Ok(None);
      };
      let height: u64 = now.saturated_into();
      let max_supply = T::MaxSupply::get();
      let outcome = emission::calculate(
        height,
        blocks,
        T::Currency::total_issuance(),
        max_supply,
        &params.emission,
      )
      .map_err(Self::settlement_error)?;

      if outcome.capped {
        log::warn!(
          target: LOG_TARGET,
          "emission capped at max supply: requested {}, emitted {}",
          outcome.requested,
          outcome.emitted
        );
        Self::deposit_event(Event::EmissionCapped {
          requested: outcome.requested,
          emitted: outcome.emitted,
          max_supply,
        });
      }

      let shares = outcome.shares;
      let mints = [
        (T::StakingRewardsAccount::get(), shares.staking),
        (T::ContributionRewardsAccount::get(), shares.contribution),
        (T::SequencerRewardsAccount::get(), shares.sequencer),
      ];
      for (account, amount) in mints.iter() {
        if !amount.is_zero() {
          T::Currency::mint_into(account, *amount)?;
        }
      }
      if !shares.treasury.is_zero() {
        T::Currency::mint_into(&Self::require_treasury()?, shares.treasury)?;
      }

      let id = NextEmissionRecordId::<T>::get();
      let record = EmissionRecord {
        id,
        block_number: now,
        inflation_rate: outcome.inflation_rate,
        total_emitted: outcome.emitted,
        staking: shares.staking,
        contribution: shares.contribution,
        sequencer: shares.sequencer,
        treasury: shares.treasury,
        capped: outcome.capped,
        timestamp: T::UnixTime::now().as_millis().saturated_into(),
      };
      EmissionRecords::<T>::insert(id, &record);
      NextEmissionRecordId::<T>::put(id.saturating_add(1));
      let covered: BlockNumberFor<T> = height
        .saturating_sub(height % params.emission.epoch_length as u64)
        .saturated_into();
      LastEmissionBlock::<T>::put(covered);

      Self::deposit_event(Event::EmissionProcessed {
        record_id: id,
        inflation_rate: outcome.inflation_rate,
        total: outcome.emitted,
        staking: shares.staking,
        contribution: shares.contribution,
        sequencer: shares.sequencer,
        treasury: shares.treasury,
      });
      Ok(Some(record))
    }

    fn do_process_treasury_redirect(
      params: &EconomicParams,
      now: BlockNumberFor<T>,
    ) -> Result<Option<redirect::RedirectPlan>, DispatchError> {
      let inflow = RedirectAccumulatedInflow::<T>::get();
      if inflow.is_zero() {
        return Ok(None);
      }
      let plan = redirect::plan(inflow, &params.redirect).map_err(Self::settlement_error)?;

      if !plan.distributed.is_zero() {
        let treasury = Self::require_treasury()?;
        let targets = RedirectTargetAccounts::<T>::get().ok_or_else(|| {
          log::error!(target: LOG_TARGET, "redirect targets not configured");
          Error::<T>::RedirectTargetsNotSet
        })?;
        for (fund, amount) in plan.allocations {
          if amount.is_zero() {
            continue;
          }
          let to = targets.account(fund);
          T::Currency::transfer(&treasury, to, amount, Preservation::Preserve)?;
          Self::deposit_event(Event::TreasuryAllocation {
            fund,
            to: to.clone(),
            amount,
          });
        }
      }

      RedirectAccumulatedInflow::<T>::put(0);
      RedirectLastExecution::<T>::put(now);
      TotalRedirected::<T>::mutate(|total| *total = total.saturating_add(plan.distributed));
      Self::deposit_event(Event::TreasuryRedirected {
        inflow,
        ratio: plan.effective_ratio,
        amount: plan.redirect_amount,
        distributed: plan.distributed,
        retained: plan.dust,
      });
      Ok(Some(plan))
    }

    fn report_telemetry(params: &EconomicParams, utilization: Perquintill) {
      let warnings = telemetry::evaluate(
        &params.telemetry,
        utilization,
        T::GasMeter::execution_time_ms(),
      );
      for warning in warnings {
        match warning {
          TelemetryWarning::HighUtilization {
            utilization,
            threshold,
          } => {
            log::warn!(
              target: LOG_TARGET,
              "high block utilization: {:?} >= {:?}",
              utilization,
              threshold
            );
            Self::deposit_event(Event::HighUtilizationWarning {
              utilization,
              threshold,
            });
          }
          TelemetryWarning::LongBlockExecution {
            elapsed_ms,
            threshold_ms,
          } => {
            log::warn!(
              target: LOG_TARGET,
              "long block execution: {}ms >= {}ms",
              elapsed_ms,
              threshold_ms
            );
            Self::deposit_event(Event::LongBlockExecutionWarning {
              elapsed_ms,
              threshold_ms,
            });
          }
        }
      }
    }

    fn report_failure(stage: SettlementStage, error: DispatchError) {
      log::error!(
        target: LOG_TARGET,
        "{:?} settlement rolled back, halting settlement for this block: {:?}",
        stage,
        error
      );
      Self::deposit_event(Event::SettlementFailed { stage, error });
    }

    fn require_treasury() -> Result<T::AccountId, DispatchError> {
      TreasuryAccount::<T>::get().ok_or_else(|| {
        log::error!(target: LOG_TARGET, "treasury account not configured");
        Error::<T>::TreasuryAccountNotSet.into()
      })
    }

    fn settlement_error(e: SettlementError) -> DispatchError {
      log::error!(target: LOG_TARGET, "settlement invariant violated: {}", e.as_str());
      Error::<T>::from(e).into()
    }

    /// Blocks owed emission at `n`, if any.
    fn emission_owed(params: &EconomicParams, n: BlockNumberFor<T>) -> Option<u64> {
      if !params.emission.enabled {
        return None;
      }
      emission::owed_blocks(
        n.saturated_into(),
        LastEmissionBlock::<T>::get().saturated_into(),
        params.emission.epoch_length,
      )
    }

    fn redirect_interval_elapsed(params: &EconomicParams, n: BlockNumberFor<T>) -> bool {
      let now: u64 = n.saturated_into();
      let last: u64 = RedirectLastExecution::<T>::get().saturated_into();
      params.redirect.enabled && now.saturating_sub(last) >= params.redirect.interval as u64
    }

    /// Utilization of the block being built, or of the previous block when the
    /// host has no live metrics.
    pub fn current_utilization() -> Perquintill {
      utilization::from_metrics(T::GasMeter::gas_metrics(), PreviousBlockUtilization::<T>::get())
    }

    pub fn utilization_info() -> UtilizationInfo {
      UtilizationInfo {
        current: Self::current_utilization(),
        previous: PreviousBlockUtilization::<T>::get(),
      }
    }

    pub fn gas_price_info() -> GasPriceInfo {
      let params = Params::<T>::get();
      let base_fee = CurrentBaseFee::<T>::get();
      GasPriceInfo {
        base_fee,
        min_gas_price: params.gas.min_gas_price,
        effective_gas_price: base_fee::effective_gas_price(base_fee, &params),
        max_tip: base_fee::max_tip(base_fee, &params),
      }
    }

    pub fn burn_tier_info() -> BurnTierInfo {
      let params = Params::<T>::get();
      let utilization = Self::current_utilization();
      let (base_rate, tier) = burn::select_tier(utilization, &params.utilization, &params.burn);
      BurnTierInfo {
        tier,
        base_rate,
        utilization,
      }
    }

    /// Burn split `fee` would receive at current utilization if attributed to `activity`.
    pub fn compute_burn_for_activity(
      fee: Balance,
      activity: ActivityType,
    ) -> Result<BurnCalculation, DispatchError> {
      let params = Params::<T>::get();
      let calc = burn::compute(&params, Self::current_utilization(), fee, activity)
        .map_err(Self::settlement_error)?;
      burn::reclamp(calc, params.safety.max_burn_ratio, &params.distribution)
        .map_err(Self::settlement_error)
    }

    pub fn fee_statistics() -> FeeStatistics {
      FeeStatistics {
        total_burned: TotalBurned::<T>::get(),
        total_to_treasury: TotalToTreasury::<T>::get(),
        total_to_validators: TotalToValidators::<T>::get(),
      }
    }

    /// Emission records with id `>= start`, at most `limit` (itself capped) of them.
    pub fn emission_records(start: u64, limit: u32) -> Vec<EmissionRecord<BlockNumberFor<T>>> {
      let end = NextEmissionRecordId::<T>::get();
      let limit = limit.min(limits::MAX_PAGE_SIZE) as u64;
      (start..end.min(start.saturating_add(limit)))
        .filter_map(|id| EmissionRecords::<T>::get(id))
        .collect()
    }

    pub fn redirect_state() -> RedirectState<T::AccountId, BlockNumberFor<T>> {
      RedirectState {
        accumulated_inflow: RedirectAccumulatedInflow::<T>::get(),
        last_execution: RedirectLastExecution::<T>::get(),
        total_redirected: TotalRedirected::<T>::get(),
        targets: RedirectTargetAccounts::<T>::get(),
      }
    }
  }
}
