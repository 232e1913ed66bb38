//! PSK receiver core
//!
//! Streaming blocks that turn oversampled complex baseband into
//! carrier-corrected symbols: polyphase filtering, Mueller-Muller symbol
//! timing recovery and a Costas carrier loop.
//!
//! ## Architecture (Hexagonal / Ports & Adapters)
//!
//! - `domain/` - Pure domain types, configuration and errors, no I/O
//! - `ports/` - Trait definitions for observing block internals
//! - `dsp/` - Signal processing blocks (pure, no I/O)
//! - `modem/` - Receiver pipeline and test-signal generator
//! - `adapters/` - Implementations of ports (in-memory and log probes)

// Core domain (pure, no I/O)
pub mod domain;
pub mod dsp;
pub mod modem;
pub mod ports;

// Adapters
pub mod adapters;

pub use domain::{ReceiverConfig, RxError, RxResult, Sample};
pub use modem::{Receiver, WaveformGenerator};
