use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Category of on-chain activity a fee was paid for.
///
/// The burn model scales the utilization tier rate by a per-category multiplier,
/// so that cheap, high-volume activity (messaging) burns less than execution-heavy
/// activity (smart contracts). `StandardGas` is the baseline every unknown or
/// unattributed fee falls back to.
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
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum ActivityType {
  /// Plain gas consumption with no specific attribution
  #[default]
  StandardGas,
  /// Native token transfers
  TokenTransfer,
  /// Contract deployment and execution
  SmartContracts,
  /// Messaging and data posting
  Messaging,
  /// Staking and delegation operations
  Staking,
  /// Governance proposals and votes
  Governance,
}

impl ActivityType {
  /// Every activity in declaration order.
  pub const ALL: [ActivityType; 6] = [
    ActivityType::StandardGas,
    ActivityType::TokenTransfer,
    ActivityType::SmartContracts,
    ActivityType::Messaging,
    ActivityType::Staking,
    ActivityType::Governance,
  ];

  /// Stable lowercase label, used in logs.
  pub fn as_str(&self) -> &'static str {
    match self {
      ActivityType::StandardGas => "standard_gas",
      ActivityType::TokenTransfer => "token_transfer",
      ActivityType::SmartContracts => "smart_contracts",
      ActivityType::Messaging => "messaging",
      ActivityType::Staking => "staking",
      ActivityType::Governance => "governance",
    }
  }
}
