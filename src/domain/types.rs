//! Core domain types

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Complex baseband sample (double precision)
pub type Sample = Complex64;

/// Snapshot of the timing loop taken every time a strobe fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrobeEvent {
    /// Recovered symbol emitted on this strobe
    pub output: Sample,
    /// Timing error from the Mueller-Muller detector
    pub timing_error: f64,
    /// Interpolation advance to the next strobe, before the already
    /// consumed fine samples are subtracted
    pub advance: f64,
    /// Running symbol index (sum of whole fine-sample advances)
    pub symbol_index: i64,
    /// Whole input samples to skip before the next strobe
    pub input_rate_mu: i64,
    /// Interpolator phase selected for the next strobe
    pub mu: usize,
    /// Sub-sample remainder carried into the next strobe
    pub residual_mu: f64,
}

/// Snapshot of the Costas loop after one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostasEvent {
    /// Derotated output sample
    pub output: Sample,
    /// Local oscillator value used for this sample
    pub vco: Sample,
    /// Phase detector output
    pub error: f64,
    /// Frequency estimate after the update (rad/sample)
    pub frequency: f64,
    /// Accumulated phase after the update (rad, unwrapped)
    pub phase: f64,
}

/// Running receiver status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiverStatus {
    /// Input samples consumed
    pub samples_in: u64,
    /// Symbols emitted
    pub symbols_out: u64,
    /// Interpolator phase selected for the next strobe
    pub mu: usize,
    /// Running symbol index of the timing loop, in fine samples
    pub symbol_index: i64,
    /// Carrier frequency estimate (rad/symbol)
    pub carrier_frequency: f64,
    /// Carrier phase (rad, wrapped to `[0, 2π)`)
    pub carrier_phase: f64,
}
