//! Costas loop for carrier phase/frequency tracking
//!
//! Works on complex baseband at (typically) the symbol rate. Each sample is
//! derotated by the local oscillator, the product of its I and Q components
//! serves as phase error, and a PI loop filter updates the oscillator.
//!
//! The I×Q detector equals `|x|²·sin(2θ)/2` for a point at angle `θ`, so a
//! BPSK stream settles on the real axis with a 180° ambiguity. For
//! constellations with points on both axes the per-symbol errors cancel and
//! the loop does not pull in.

use std::f64::consts::TAU;
use std::fmt;

use num_complex::Complex64;

use crate::domain::{CostasConfig, CostasEvent, RxResult, Sample};
use crate::ports::Probe;

/// Second-order Costas loop
pub struct CostasLoop {
    /// Proportional gain
    alpha: f64,
    /// Integral gain
    beta: f64,
    initial_phase: f64,
    initial_frequency: f64,
    /// Oscillator phase in radians, not wrapped
    phase: f64,
    /// Frequency estimate in radians/sample
    frequency: f64,
    probe: Option<Box<dyn Probe<CostasEvent>>>,
}

impl fmt::Debug for CostasLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostasLoop")
            .field("alpha", &self.alpha)
            .field("beta", &self.beta)
            .field("phase", &self.phase)
            .field("frequency", &self.frequency)
            .field("has_probe", &self.probe.is_some())
            .finish_non_exhaustive()
    }
}

impl CostasLoop {
    /// Create a new Costas loop
    pub fn new(config: &CostasConfig) -> RxResult<Self> {
        config.validate()?;

        log::debug!(
            "costas loop: alpha={}, beta={}, phase0={}, freq0={}",
            config.alpha,
            config.beta,
            config.initial_phase,
            config.initial_frequency
        );

        Ok(Self {
            alpha: config.alpha,
            beta: config.beta,
            initial_phase: config.initial_phase,
            initial_frequency: config.initial_frequency,
            phase: config.initial_phase,
            frequency: config.initial_frequency,
            probe: None,
        })
    }

    /// Attach a probe that receives the loop state after every sample
    pub fn with_probe(mut self, probe: Box<dyn Probe<CostasEvent>>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn set_probe(&mut self, probe: Option<Box<dyn Probe<CostasEvent>>>) {
        self.probe = probe;
    }

    /// Process a single sample, returns the derotated sample
    pub fn process(&mut self, sample: Sample) -> Sample {
        let vco = Complex64::new(0.0, -self.phase).exp();
        let out = sample * vco;

        // Phase error detector: zero when the point lies on an axis
        let error = out.re * out.im;

        // Loop filter (PI controller)
        self.frequency += self.beta * error;
        self.phase += self.alpha * error + self.frequency;

        if let Some(probe) = self.probe.as_mut() {
            probe.record(&CostasEvent {
                output: out,
                vco,
                error,
                frequency: self.frequency,
                phase: self.phase,
            });
        }

        out
    }

    /// Process a block of samples
    pub fn process_block(&mut self, samples: &[Sample]) -> Vec<Sample> {
        samples.iter().map(|&s| self.process(s)).collect()
    }

    /// Accumulated oscillator phase (radians, unwrapped)
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Oscillator phase folded into `[0, 2π)`
    pub fn wrapped_phase(&self) -> f64 {
        self.phase.rem_euclid(TAU)
    }

    /// Frequency estimate in radians/sample
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Reset the loop to its configured initial state
    pub fn reset(&mut self) {
        self.phase = self.initial_phase;
        self.frequency = self.initial_frequency;
    }
}
