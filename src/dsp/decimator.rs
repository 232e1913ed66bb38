//! Polyphase decimator
//!
//! Filters and downsamples by `M` in one pass: each input sample goes to a
//! single phase branch, and the branch outputs for one block of `M` inputs
//! are summed into one output sample. Taps that a filter-then-discard
//! decimator would compute and throw away are never evaluated.

use num_complex::Complex64;

use super::filter::FirFilter;
use super::polyphase::phase_bank;
use crate::domain::{RxResult, Sample};

/// Polyphase decimate-by-M filter
#[derive(Debug, Clone)]
pub struct PolyphaseDecimator {
    filters: Vec<FirFilter>,
    phase: usize,
    sum: Sample,
}

impl PolyphaseDecimator {
    /// Build a decimator from the factor `m` and a prototype lowpass
    pub fn new(m: usize, taps: &[f64]) -> RxResult<Self> {
        let filters = phase_bank(m, taps)?;
        log::debug!(
            "decimator: M={m}, {} prototype taps, {} taps per branch",
            taps.len(),
            filters[0].len()
        );
        Ok(Self {
            filters,
            phase: 0,
            sum: Complex64::new(0.0, 0.0),
        })
    }

    /// Push one input sample. Returns `Some` once every `M` inputs.
    pub fn process(&mut self, sample: Sample) -> Option<Sample> {
        self.sum += self.filters[self.phase].process(sample);

        if self.phase == self.filters.len() - 1 {
            self.phase = 0;
            Some(std::mem::replace(&mut self.sum, Complex64::new(0.0, 0.0)))
        } else {
            self.phase += 1;
            None
        }
    }

    /// Push a block of samples, collecting every decimated output
    pub fn process_block(&mut self, samples: &[Sample]) -> Vec<Sample> {
        samples.iter().filter_map(|&s| self.process(s)).collect()
    }

    pub fn factor(&self) -> usize {
        self.filters.len()
    }

    /// Branch that will receive the next input
    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn reset(&mut self) {
        self.filters.iter_mut().for_each(FirFilter::reset);
        self.phase = 0;
        self.sum = Complex64::new(0.0, 0.0);
    }
}
