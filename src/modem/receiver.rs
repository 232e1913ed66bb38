//! Receiver pipeline
//!
//! Chains the streaming blocks in the order a capture flows through them:
//!
//! ```text
//! samples → [prefilter] → [decimator] → clock recovery → Costas loop → symbols
//! ```
//!
//! The prefilter and decimator are optional. Each input sample yields at
//! most one recovered symbol.

use crate::domain::{ReceiverConfig, ReceiverStatus, RxResult, Sample};
use crate::dsp::clock_recovery::ClockRecovery;
use crate::dsp::costas_loop::CostasLoop;
use crate::dsp::decimator::PolyphaseDecimator;
use crate::dsp::filter::FirFilter;

/// Streaming symbol receiver
pub struct Receiver {
    name: String,
    prefilter: Option<FirFilter>,
    decimator: Option<PolyphaseDecimator>,
    clock_recovery: ClockRecovery,
    costas_loop: CostasLoop,
    samples_in: u64,
    symbols_out: u64,
}

impl Receiver {
    /// Build every stage of the chain from a validated profile
    pub fn new(config: &ReceiverConfig) -> RxResult<Self> {
        config.validate()?;

        let prefilter = config
            .prefilter_taps
            .as_deref()
            .map(FirFilter::from_real)
            .transpose()?;
        let decimator = config
            .decimation
            .as_ref()
            .map(|d| PolyphaseDecimator::new(d.factor, &d.taps))
            .transpose()?;
        let clock_recovery = ClockRecovery::new(&config.timing)?;
        let costas_loop = CostasLoop::new(&config.costas)?;

        log::info!(
            "receiver '{}': prefilter={}, decimation={}, {} samples/symbol, mu_gain={}, costas alpha={} beta={}",
            config.name,
            prefilter.as_ref().map_or(0, FirFilter::len),
            decimator.as_ref().map_or(1, PolyphaseDecimator::factor),
            config.timing.input_rate,
            config.timing.mu_gain,
            config.costas.alpha,
            config.costas.beta
        );

        Ok(Self {
            name: config.name.clone(),
            prefilter,
            decimator,
            clock_recovery,
            costas_loop,
            samples_in: 0,
            symbols_out: 0,
        })
    }

    /// Process one input sample, returns a symbol when the timing loop strobes
    pub fn process(&mut self, sample: Sample) -> Option<Sample> {
        self.samples_in += 1;

        let mut x = sample;
        if let Some(prefilter) = self.prefilter.as_mut() {
            x = prefilter.process(x);
        }
        if let Some(decimator) = self.decimator.as_mut() {
            x = decimator.process(x)?;
        }

        let symbol = self.clock_recovery.process(x)?;
        self.symbols_out += 1;
        Some(self.costas_loop.process(symbol))
    }

    /// Process a block of samples, returns the recovered symbols
    pub fn process_block(&mut self, samples: &[Sample]) -> Vec<Sample> {
        samples.iter().filter_map(|&s| self.process(s)).collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clock_recovery(&self) -> &ClockRecovery {
        &self.clock_recovery
    }

    /// Mutable access, e.g. to attach a probe
    pub fn clock_recovery_mut(&mut self) -> &mut ClockRecovery {
        &mut self.clock_recovery
    }

    pub fn costas_loop(&self) -> &CostasLoop {
        &self.costas_loop
    }

    /// Mutable access, e.g. to attach a probe
    pub fn costas_loop_mut(&mut self) -> &mut CostasLoop {
        &mut self.costas_loop
    }

    /// Current counters and loop state
    pub fn status(&self) -> ReceiverStatus {
        ReceiverStatus {
            samples_in: self.samples_in,
            symbols_out: self.symbols_out,
            mu: self.clock_recovery.mu(),
            symbol_index: self.clock_recovery.symbol_index(),
            carrier_frequency: self.costas_loop.frequency(),
            carrier_phase: self.costas_loop.wrapped_phase(),
        }
    }

    /// Return every stage to its initial state
    pub fn reset(&mut self) {
        if let Some(prefilter) = self.prefilter.as_mut() {
            prefilter.reset();
        }
        if let Some(decimator) = self.decimator.as_mut() {
            decimator.reset();
        }
        self.clock_recovery.reset();
        self.costas_loop.reset();
        self.samples_in = 0;
        self.symbols_out = 0;
    }
}
