//! Symbol timing recovery
//!
//! Mueller-Muller timing recovery over a polyphase interpolation farm.
//!
//! Every input sample is upsampled by the interpolator into `L` fine
//! samples. Once enough whole input samples have gone by, a strobe fires:
//! the fine sample at phase `mu` becomes the next symbol estimate and a
//! decision-directed timing error adjusts where the following strobe lands.
//!
//! Timing is tracked in fine-sample units. `residual_mu` accumulates the
//! nominal advance of `iL·L` fine samples per symbol plus the loop
//! correction, and is split into whole input samples to wait
//! (`input_rate_mu`) and a phase index into the interpolator (`mu`).

use std::fmt;

use num_complex::Complex64;

use super::design;
use super::interpolator::PolyphaseInterpolator;
use crate::domain::{RxResult, Sample, StrobeEvent, TimingConfig};
use crate::ports::Probe;

/// Symbol clock recovery using the Mueller-Muller timing error detector
pub struct ClockRecovery {
    interp: PolyphaseInterpolator,
    mu_gain: f64,
    input_rate: f64,
    interp_rate: f64,
    /// Last three strobed samples, oldest first
    history: [Sample; 3],
    /// Interpolator phase used at the next strobe, always in `[0, L)`
    mu: usize,
    residual_mu: f64,
    /// Whole input samples between strobes. Only negative under extreme
    /// loop gains; the next input then strobes immediately.
    input_rate_mu: i64,
    input_count: i64,
    symbol_index: i64,
    probe: Option<Box<dyn Probe<StrobeEvent>>>,
}

impl fmt::Debug for ClockRecovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockRecovery")
            .field("interp_rate", &self.interp_rate)
            .field("input_rate", &self.input_rate)
            .field("mu_gain", &self.mu_gain)
            .field("mu", &self.mu)
            .field("residual_mu", &self.residual_mu)
            .field("input_rate_mu", &self.input_rate_mu)
            .field("symbol_index", &self.symbol_index)
            .field("has_probe", &self.probe.is_some())
            .finish_non_exhaustive()
    }
}

impl ClockRecovery {
    /// Create a new clock recovery block
    pub fn new(config: &TimingConfig) -> RxResult<Self> {
        config.validate()?;

        let taps = config
            .interp_taps
            .clone()
            .unwrap_or_else(|| design::zero_order_hold(config.interp_rate));
        let interp = PolyphaseInterpolator::new(config.interp_rate, &taps)?;

        log::debug!(
            "clock recovery: mu_gain={}, iL={}, L={}, {} interpolator taps",
            config.mu_gain,
            config.input_rate,
            config.interp_rate,
            taps.len()
        );

        Ok(Self {
            interp,
            mu_gain: config.mu_gain,
            input_rate: config.input_rate as f64,
            interp_rate: config.interp_rate as f64,
            history: [Complex64::new(0.0, 0.0); 3],
            mu: 0,
            residual_mu: 0.0,
            input_rate_mu: 0,
            input_count: 0,
            symbol_index: 0,
            probe: None,
        })
    }

    /// Attach a probe that receives every strobe
    pub fn with_probe(mut self, probe: Box<dyn Probe<StrobeEvent>>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn set_probe(&mut self, probe: Option<Box<dyn Probe<StrobeEvent>>>) {
        self.probe = probe;
    }

    /// Process a sample, returns Some(symbol) at symbol decision points
    pub fn process(&mut self, sample: Sample) -> Option<Sample> {
        let fine_samples = self.interp.process(sample);

        if self.input_count < self.input_rate_mu {
            self.input_count += 1;
            return None;
        }

        // Fine synchronization: take the selected fractional phase
        self.history.rotate_left(1);
        self.history[2] = fine_samples[self.mu];

        let timing_error = self.timing_error();
        let l = self.interp_rate;

        // Offset to the next symbol, in fine samples
        self.residual_mu += self.input_rate * l + self.mu_gain * timing_error;
        let advance = self.residual_mu;
        // Saturates on absurd timing errors from huge (finite) inputs
        self.symbol_index = self
            .symbol_index
            .saturating_add(self.residual_mu.floor() as i64);

        // The interpolator already produced the phases after `mu` for this input
        self.residual_mu -= l - self.mu as f64;

        let (mut whole, rem) = floor_divmod(self.residual_mu, l);
        let mut mu = rem.floor();
        if mu >= l {
            // A tiny negative remainder rounds up to exactly `l`
            mu = 0.0;
            whole += 1.0;
        }
        self.residual_mu -= whole * l + mu;
        self.input_rate_mu = whole as i64;
        self.mu = mu as usize;
        self.input_count = 0;

        let output = self.history[2];

        if let Some(probe) = self.probe.as_mut() {
            probe.record(&StrobeEvent {
                output,
                timing_error,
                advance,
                symbol_index: self.symbol_index,
                input_rate_mu: self.input_rate_mu,
                mu: self.mu,
                residual_mu: self.residual_mu,
            });
        }

        Some(output)
    }

    /// Decision-directed Mueller-Muller error over the strobe history
    fn timing_error(&self) -> f64 {
        let [h0, h1, h2] = self.history;
        let [r0, r1, r2] = self.history.map(slice);
        let x = (r2 - r0) * h1.conj();
        let y = (h2 - h0) * r1.conj();
        (y - x).re
    }

    pub fn mu(&self) -> usize {
        self.mu
    }

    pub fn residual_mu(&self) -> f64 {
        self.residual_mu
    }

    pub fn input_rate_mu(&self) -> i64 {
        self.input_rate_mu
    }

    /// Running symbol index in fine samples
    pub fn symbol_index(&self) -> i64 {
        self.symbol_index
    }

    /// Last three strobed samples, oldest first
    pub fn history(&self) -> &[Sample; 3] {
        &self.history
    }

    /// Reset the clock recovery state
    pub fn reset(&mut self) {
        self.interp.reset();
        self.history = [Complex64::new(0.0, 0.0); 3];
        self.mu = 0;
        self.residual_mu = 0.0;
        self.input_rate_mu = 0;
        self.input_count = 0;
        self.symbol_index = 0;
    }
}

/// Floor division and remainder derived from the same `fmod`, so that
/// `v == div·l + rem` holds with `rem` in `[0, l]` for `l > 0`.
fn floor_divmod(v: f64, l: f64) -> (f64, f64) {
    let mut rem = v % l;
    let mut div = (v - rem) / l;
    if rem < 0.0 {
        rem += l;
        div -= 1.0;
    }
    let mut floordiv = div.floor();
    if div - floordiv > 0.5 {
        floordiv += 1.0;
    }
    (floordiv, rem)
}

/// Hard decision: sign of each axis, zero stays zero
fn slice(x: Sample) -> Sample {
    Complex64::new(sign(x.re), sign(x.im))
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        v
    }
}
