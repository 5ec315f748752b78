//! Error types shared by the pure settlement modules.

use crate::params::ParamsError;

/// Failure of a settlement computation.
///
/// Returned by the pure modules and mapped onto the pallet `Error<T>` at the
/// storage boundary; any of these aborts the enclosing settlement unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementError {
  /// A split did not sum exactly to its input
  ConservationViolation,
  /// An intermediate value left the representable range
  ArithmeticOverflow,
  /// A computed rate escaped its hard protocol ceiling
  ProtocolCapViolation,
  /// Stored parameters violate an invariant re-checked at computation time
  InvalidParams(ParamsError),
}

impl SettlementError {
  /// Name of the violated invariant, for structured logs.
  pub fn as_str(&self) -> &'static str {
    match self {
      SettlementError::ConservationViolation => "conservation",
      SettlementError::ArithmeticOverflow => "arithmetic_overflow",
      SettlementError::ProtocolCapViolation => "protocol_cap",
      SettlementError::InvalidParams(e) => e.as_str(),
    }
  }
}

impl From<ParamsError> for SettlementError {
  fn from(e: ParamsError) -> Self {
    SettlementError::InvalidParams(e)
  }
}
