//! PSK receiver
//!
//! The block chain assembled into a receiver, and the test-signal source
//! that feeds it.

pub mod receiver;
pub mod waveform;

pub use receiver::Receiver;
pub use waveform::WaveformGenerator;
