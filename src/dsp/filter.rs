//! FIR filter implementation

use num_complex::Complex64;

use crate::domain::{RxError, RxResult, Sample};

/// Direct-form FIR filter over complex samples.
///
/// `taps[0]` multiplies the newest sample. The delay line is a ring buffer;
/// `position` points at the slot holding the newest sample.
#[derive(Debug, Clone)]
pub struct FirFilter {
    taps: Vec<Complex64>,
    delay_line: Vec<Sample>,
    position: usize,
}

impl FirFilter {
    /// Create a new FIR filter with the given complex taps
    pub fn new(taps: Vec<Complex64>) -> RxResult<Self> {
        if taps.is_empty() {
            return Err(RxError::Filter("FIR filter needs at least one tap".into()));
        }
        let len = taps.len();
        Ok(Self {
            taps,
            delay_line: vec![Complex64::new(0.0, 0.0); len],
            position: len - 1,
        })
    }

    /// Create a filter from real-valued taps
    pub fn from_real(taps: &[f64]) -> RxResult<Self> {
        Self::new(taps.iter().map(|&t| Complex64::new(t, 0.0)).collect())
    }

    /// Push one sample and return the filter output
    pub fn process(&mut self, sample: Sample) -> Sample {
        let len = self.taps.len();
        self.position = (self.position + 1) % len;
        self.delay_line[self.position] = sample;

        let mut output = Complex64::new(0.0, 0.0);
        for (i, tap) in self.taps.iter().enumerate() {
            let delay_idx = (self.position + len - i) % len;
            output += self.delay_line[delay_idx] * *tap;
        }
        output
    }

    pub fn taps(&self) -> &[Complex64] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Filter state, newest sample first
    pub fn history(&self) -> Vec<Sample> {
        let len = self.taps.len();
        (0..len)
            .map(|i| self.delay_line[(self.position + len - i) % len])
            .collect()
    }

    /// Reset the filter state
    pub fn reset(&mut self) {
        self.delay_line.fill(Complex64::new(0.0, 0.0));
        self.position = self.taps.len() - 1;
    }
}
