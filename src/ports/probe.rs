//! Diagnostic probe trait
//!
//! Feedback blocks report their internal state through a probe instead of
//! appending to ever-growing history buffers. A block without a probe
//! skips the event construction entirely.

/// Receives one event per block update.
pub trait Probe<E>: Send {
    fn record(&mut self, event: &E);
}
