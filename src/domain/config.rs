//! Receiver configuration profiles
//!
//! A `ReceiverConfig` bundles every construction parameter of the receiver
//! chain. Profiles can be stored as JSON files and loaded back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{RxError, RxResult};

/// Mueller-Muller timing recovery parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Loop gain applied to the timing error
    pub mu_gain: f64,
    /// Input oversampling rate (samples per symbol)
    pub input_rate: usize,
    /// Interpolation rate of the fractional-delay filter bank
    pub interp_rate: usize,
    /// Interpolator prototype taps. `None` selects a zero-order hold of
    /// length `interp_rate`, which makes every phase a pass-through.
    pub interp_taps: Option<Vec<f64>>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            mu_gain: 0.008,
            input_rate: 8,
            interp_rate: 16,
            interp_taps: None,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> RxResult<()> {
        check_finite("mu_gain", self.mu_gain)?;
        check_positive("input_rate", self.input_rate)?;
        check_positive("interp_rate", self.interp_rate)?;
        if let Some(taps) = &self.interp_taps {
            check_taps("interp_taps", taps)?;
        }
        Ok(())
    }
}

/// Costas loop gains and initial oscillator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostasConfig {
    /// Proportional (phase) gain
    pub alpha: f64,
    /// Integral (frequency) gain
    pub beta: f64,
    /// Initial oscillator phase in radians
    pub initial_phase: f64,
    /// Initial frequency estimate in radians/sample
    pub initial_frequency: f64,
}

impl Default for CostasConfig {
    fn default() -> Self {
        Self {
            alpha: 0.132,
            beta: 0.00932,
            initial_phase: 0.0,
            initial_frequency: 0.0,
        }
    }
}

impl CostasConfig {
    pub fn validate(&self) -> RxResult<()> {
        check_finite("alpha", self.alpha)?;
        check_finite("beta", self.beta)?;
        check_finite("initial_phase", self.initial_phase)?;
        check_finite("initial_frequency", self.initial_frequency)
    }
}

/// Polyphase decimation stage ahead of timing recovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecimationConfig {
    pub factor: usize,
    pub taps: Vec<f64>,
}

impl DecimationConfig {
    pub fn validate(&self) -> RxResult<()> {
        check_positive("decimation factor", self.factor)?;
        check_taps("decimation taps", &self.taps)
    }
}

/// Test-signal generator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformConfig {
    /// Samples per symbol
    pub oversampling: usize,
    /// Carrier frequency offset in cycles/sample
    pub frequency_offset: f64,
    /// Eb/N0 in dB. `None` or `+inf` produces a noiseless waveform.
    pub ebn0_db: Option<f64>,
    /// Root-raised-cosine roll-off factor
    pub rolloff: f64,
    /// Root-raised-cosine length in taps
    pub num_taps: usize,
    /// Noise generator seed
    pub seed: u64,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            oversampling: 8,
            frequency_offset: 0.0,
            ebn0_db: None,
            rolloff: 0.35,
            num_taps: 101,
            seed: 0,
        }
    }
}

impl WaveformConfig {
    pub fn validate(&self) -> RxResult<()> {
        check_positive("oversampling", self.oversampling)?;
        check_positive("num_taps", self.num_taps)?;
        check_finite("frequency_offset", self.frequency_offset)?;
        if !(0.0..=1.0).contains(&self.rolloff) {
            return Err(config_error(format!(
                "rolloff must be within [0, 1], got {}",
                self.rolloff
            )));
        }
        if let Some(ebn0) = self.ebn0_db {
            // +inf is accepted and means noiseless
            if ebn0.is_nan() || ebn0 == f64::NEG_INFINITY {
                return Err(config_error(format!("ebn0_db must be a number, got {ebn0}")));
            }
        }
        Ok(())
    }
}

/// A complete receiver profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Profile name (e.g., "BPSK 8x", "Bench capture")
    pub name: String,
    /// Optional channel/matched filter applied at the input rate
    #[serde(default)]
    pub prefilter_taps: Option<Vec<f64>>,
    /// Optional decimation stage after the prefilter
    #[serde(default)]
    pub decimation: Option<DecimationConfig>,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub costas: CostasConfig,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            prefilter_taps: None,
            decimation: None,
            timing: TimingConfig::default(),
            costas: CostasConfig::default(),
        }
    }
}

impl ReceiverConfig {
    /// Check every stage's parameters
    pub fn validate(&self) -> RxResult<()> {
        if let Some(taps) = &self.prefilter_taps {
            check_taps("prefilter_taps", taps)?;
        }
        if let Some(decimation) = &self.decimation {
            decimation.validate()?;
        }
        self.timing.validate()?;
        self.costas.validate()
    }

    /// Write the profile as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> RxResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RxError::Config(format!("Serialization error: {e}")))?;
        std::fs::write(path, json).map_err(|e| {
            RxError::Config(format!("Failed to write config '{}': {e}", path.display()))
        })
    }

    /// Read a profile and validate it
    pub fn load(path: impl AsRef<Path>) -> RxResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RxError::Config(format!("Failed to read config '{}': {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|e| {
            RxError::Config(format!("Failed to parse config '{}': {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn config_error(msg: String) -> RxError {
    log::warn!("rejected configuration: {msg}");
    RxError::Config(msg)
}

fn check_positive(name: &str, value: usize) -> RxResult<()> {
    if value == 0 {
        return Err(config_error(format!("{name} must be at least 1")));
    }
    Ok(())
}

fn check_finite(name: &str, value: f64) -> RxResult<()> {
    if !value.is_finite() {
        return Err(config_error(format!("{name} must be finite, got {value}")));
    }
    Ok(())
}

fn check_taps(name: &str, taps: &[f64]) -> RxResult<()> {
    if taps.is_empty() {
        return Err(config_error(format!("{name} cannot be empty")));
    }
    if taps.iter().any(|t| !t.is_finite()) {
        return Err(config_error(format!("{name} contains a non-finite tap")));
    }
    Ok(())
}
