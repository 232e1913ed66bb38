//! Polyphase interpolator
//!
//! Every input sample is pushed into all `L` phase branches. Branch `i`
//! produces the output at fractional delay `i/L` within the current input
//! period, so one call yields the whole upsampled block without ever
//! filtering the stuffed zeros.

use num_complex::Complex64;

use super::filter::FirFilter;
use super::polyphase::phase_bank;
use crate::domain::{RxResult, Sample};

/// Polyphase interpolate-by-L filter
#[derive(Debug, Clone)]
pub struct PolyphaseInterpolator {
    filters: Vec<FirFilter>,
    outputs: Vec<Sample>,
}

impl PolyphaseInterpolator {
    pub fn new(l: usize, taps: &[f64]) -> RxResult<Self> {
        let filters = phase_bank(l, taps)?;
        log::debug!(
            "interpolator: L={l}, {} prototype taps, {} taps per branch",
            taps.len(),
            filters[0].len()
        );
        Ok(Self {
            filters,
            outputs: vec![Complex64::new(0.0, 0.0); l],
        })
    }

    /// Push one input sample and return the `L` phase outputs, phase 0 first
    pub fn process(&mut self, sample: Sample) -> &[Sample] {
        for (out, filter) in self.outputs.iter_mut().zip(self.filters.iter_mut()) {
            *out = filter.process(sample);
        }
        &self.outputs
    }

    pub fn factor(&self) -> usize {
        self.filters.len()
    }

    pub fn reset(&mut self) {
        self.filters.iter_mut().for_each(FirFilter::reset);
        self.outputs.fill(Complex64::new(0.0, 0.0));
    }
}
