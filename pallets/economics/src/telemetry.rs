//! Threshold warnings raised at the end of each block.

use crate::types::TelemetryParams;
use alloc::vec::Vec;
use polkadot_sdk::sp_runtime::Perquintill;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TelemetryWarning {
  HighUtilization {
    utilization: Perquintill,
    threshold: Perquintill,
  },
  LongBlockExecution {
    elapsed_ms: u64,
    threshold_ms: u64,
  },
}

/// Warnings for one block. Zero thresholds are disabled.
pub fn evaluate(
  params: &TelemetryParams,
  utilization: Perquintill,
  elapsed_ms: Option<u64>,
) -> Vec<TelemetryWarning> {
  let mut warnings = Vec::new();
  if params.high_utilization.deconstruct() > 0 && utilization >= params.high_utilization {
    warnings.push(TelemetryWarning::HighUtilization {
      utilization,
      threshold: params.high_utilization,
    });
  }
  if let Some(elapsed_ms) = elapsed_ms {
    if params.long_block_ms > 0 && elapsed_ms >= params.long_block_ms {
      warnings.push(TelemetryWarning::LongBlockExecution {
        elapsed_ms,
        threshold_ms: params.long_block_ms,
      });
    }
  }
  warnings
}
