//! Test-signal generator
//!
//! Produces the oversampled complex baseband a receiver would see:
//! symbols → zero-stuffing to `L` samples/symbol → root-raised-cosine pulse
//! shaping → carrier frequency offset → additive complex Gaussian noise.
//!
//! This is a signal source for tests and benches, not part of the receive
//! chain. Noise is drawn from a seeded generator so every run of a test
//! sees the same waveform.

use num_complex::Complex64;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::domain::{RxError, RxResult, Sample, WaveformConfig};
use crate::dsp::design;
use crate::dsp::interpolator::PolyphaseInterpolator;
use crate::dsp::nco::Nco;

/// RRC-shaped waveform source with frequency offset and AWGN
pub struct WaveformGenerator {
    config: WaveformConfig,
    pulse: Vec<f64>,
    rng: ChaCha8Rng,
}

impl WaveformGenerator {
    pub fn new(config: WaveformConfig) -> RxResult<Self> {
        config.validate()?;

        let pulse = design::root_raised_cosine(
            config.num_taps,
            config.rolloff,
            1.0,
            config.oversampling as f64,
        );
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        log::debug!(
            "waveform: L={}, offset={} cycles/sample, Eb/N0={:?} dB, rolloff={}, {} taps",
            config.oversampling,
            config.frequency_offset,
            config.ebn0_db,
            config.rolloff,
            config.num_taps
        );

        Ok(Self { config, pulse, rng })
    }

    /// Pulse-shaping taps
    pub fn pulse(&self) -> &[f64] {
        &self.pulse
    }

    /// Per-component noise standard deviation, `None` when noiseless.
    ///
    /// `N0 = L / (Eb/N0)` for unit-energy symbols spread over `L` samples,
    /// split evenly between I and Q.
    pub fn noise_std(&self) -> Option<f64> {
        self.config.ebn0_db.filter(|db| db.is_finite()).map(|ebn0_db| {
            let ebn0 = 10f64.powf(ebn0_db / 10.0);
            let n0 = self.config.oversampling as f64 / ebn0;
            (n0 / 2.0).sqrt()
        })
    }

    /// Generate the waveform for real-valued (e.g. ±1 BPSK) symbols
    pub fn generate(&mut self, symbols: &[f64]) -> RxResult<Vec<Sample>> {
        let symbols: Vec<Sample> = symbols.iter().map(|&s| Complex64::new(s, 0.0)).collect();
        self.generate_complex(&symbols)
    }

    /// Generate the waveform for complex symbols.
    ///
    /// Output length is the full convolution length,
    /// `symbols.len()·L + num_taps - 1`.
    pub fn generate_complex(&mut self, symbols: &[Sample]) -> RxResult<Vec<Sample>> {
        if symbols.is_empty() {
            return Err(RxError::Waveform("no symbols to modulate".into()));
        }

        let shaped = self.pulse_shape(symbols)?;

        let mut nco = Nco::new(self.config.frequency_offset);
        let mut samples: Vec<Sample> = shaped.into_iter().map(|s| nco.mix(s)).collect();

        if let Some(std_dev) = self.noise_std() {
            let normal = Normal::new(0.0, std_dev)
                .map_err(|e| RxError::Waveform(format!("invalid noise level: {e}")))?;
            for s in &mut samples {
                *s += Complex64::new(normal.sample(&mut self.rng), normal.sample(&mut self.rng));
            }
        }

        Ok(samples)
    }

    /// Zero-stuff and filter in one pass: a polyphase interpolator over the
    /// pulse emits exactly the `L` shaped samples of each symbol period.
    fn pulse_shape(&self, symbols: &[Sample]) -> RxResult<Vec<Sample>> {
        let l = self.config.oversampling;
        let len = symbols.len() * l + self.pulse.len() - 1;
        let flush = (self.pulse.len() - 1).div_ceil(l);

        let mut interp = PolyphaseInterpolator::new(l, &self.pulse)?;
        let mut shaped = Vec::with_capacity((symbols.len() + flush) * l);
        let tail = vec![Complex64::new(0.0, 0.0); flush];
        for &symbol in symbols.iter().chain(&tail) {
            shaped.extend_from_slice(interp.process(symbol));
        }
        shaped.truncate(len);
        Ok(shaped)
    }
}
