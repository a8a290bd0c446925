//! Measured-cost bookkeeping exposed as plain data.
//!
//! Metrics are the sole surface for soft failures: dropped signals and
//! budget breaches accumulate here instead of aborting ticks. Everything
//! is a plain serializable counter struct so embedders can snapshot and
//! ship them wherever they like.

use serde::{Deserialize, Serialize};

/// Per-matrix execution counters.
///
/// `record` is called once per hot-path invocation with the measured
/// cycle delta; the sub-100ns bucket uses the matrix's configured cycle
/// threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceCounters {
    /// Total hot-path executions across all domains.
    pub total_executions: u64,
    /// Executions whose measured cycles fell under the sub-100ns threshold.
    pub sub_100ns_count: u64,
    /// Fastest observed execution, in cycles.
    pub min_cycles: u64,
    /// Slowest observed execution, in cycles.
    pub max_cycles: u64,
    /// Cycle sum over all executions (for the running average).
    pub total_cycles: u64,
}

impl Default for PerformanceCounters {
    fn default() -> Self {
        Self {
            total_executions: 0,
            sub_100ns_count: 0,
            min_cycles: u64::MAX,
            max_cycles: 0,
            total_cycles: 0,
        }
    }
}

impl PerformanceCounters {
    /// Fold one measured execution into the counters.
    pub fn record(&mut self, elapsed_cycles: u64, sub_100ns_threshold: u64) {
        self.total_executions += 1;
        self.total_cycles += elapsed_cycles;
        if elapsed_cycles < sub_100ns_threshold {
            self.sub_100ns_count += 1;
        }
        if elapsed_cycles < self.min_cycles {
            self.min_cycles = elapsed_cycles;
        }
        if elapsed_cycles > self.max_cycles {
            self.max_cycles = elapsed_cycles;
        }
    }

    /// Average cycles per execution, or zero before any execution.
    pub fn avg_cycles(&self) -> u64 {
        if self.total_executions == 0 {
            0
        } else {
            self.total_cycles / self.total_executions
        }
    }

    /// Fraction of executions under the sub-100ns threshold, in `[0, 1]`.
    pub fn sub_100ns_ratio(&self) -> f64 {
        if self.total_executions == 0 {
            0.0
        } else {
            self.sub_100ns_count as f64 / self.total_executions as f64
        }
    }
}

/// Per-oracle entanglement counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OracleMetrics {
    /// Signals successfully enqueued by propagation.
    pub signals_propagated: u64,
    /// Signals drained and applied by `process_signals`.
    pub signals_processed: u64,
    /// Signals dropped for hop bounds or ring capacity.
    pub bounded_rejections: u64,
    /// Dark bits cleared by high-bit payloads during processing.
    pub dark_activations: u64,
}

/// Dark-triple system counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DarkTripleMetrics {
    /// Dormant→active transitions.
    pub total_activations: u64,
    /// Active→dormant transitions (age-out).
    pub total_deactivations: u64,
}
