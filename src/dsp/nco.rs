//! Numerically Controlled Oscillator

use std::f64::consts::TAU;

use num_complex::Complex64;

/// Complex NCO producing `exp(j·2π·f·n)` one sample at a time
#[derive(Debug, Clone)]
pub struct Nco {
    phase: f64,
    phase_increment: f64,
}

impl Nco {
    /// Create a new NCO at `frequency` cycles/sample
    pub fn new(frequency: f64) -> Self {
        Self {
            phase: 0.0,
            phase_increment: TAU * frequency,
        }
    }

    /// Set the oscillator frequency in cycles/sample
    pub fn set_frequency(&mut self, frequency: f64) {
        self.phase_increment = TAU * frequency;
    }

    /// Get the current frequency in cycles/sample
    pub fn frequency(&self) -> f64 {
        self.phase_increment / TAU
    }

    /// Generate the next unit phasor
    pub fn next_phasor(&mut self) -> Complex64 {
        let phasor = Complex64::from_polar(1.0, self.phase);
        self.phase += self.phase_increment;
        self.wrap_phase();
        phasor
    }

    /// Rotate `sample` by the current phasor and advance
    pub fn mix(&mut self, sample: Complex64) -> Complex64 {
        sample * self.next_phasor()
    }

    /// Reset phase to zero
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    fn wrap_phase(&mut self) {
        self.phase = self.phase.rem_euclid(TAU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nco_frequency() {
        let mut nco = Nco::new(1.0 / 48.0);

        // Two full cycles: the real part crosses zero four times
        let samples: Vec<f64> = (0..96).map(|_| nco.next_phasor().re).collect();
        let zero_crossings = samples
            .windows(2)
            .filter(|w| (w[0] >= 0.0 && w[1] < 0.0) || (w[0] < 0.0 && w[1] >= 0.0))
            .count();

        assert_eq!(zero_crossings, 4);
    }

    #[test]
    fn test_phasor_matches_closed_form() {
        let f = 0.0123;
        let mut nco = Nco::new(f);
        for n in 0..5_000 {
            let expected = Complex64::new(0.0, TAU * f * n as f64).exp();
            let got = nco.next_phasor();
            assert!((got - expected).norm() < 1e-9, "sample {n}: {got} vs {expected}");
        }
    }

    #[test]
    fn test_negative_frequency_rotates_backwards() {
        let mut nco = Nco::new(-0.25);
        nco.next_phasor();
        let second = nco.next_phasor();
        assert!((second - Complex64::new(0.0, -1.0)).norm() < 1e-12);
        assert!((nco.frequency() + 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_mix_and_reset() {
        let mut nco = Nco::new(0.25);
        let x = Complex64::new(2.0, 0.0);
        assert_eq!(nco.mix(x), x);
        nco.mix(x);
        nco.reset();
        assert_eq!(nco.mix(x), x);
    }
}
