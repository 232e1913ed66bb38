//! Digital Signal Processing
//!
//! Streaming blocks for the receive chain. No I/O dependencies.

pub mod clock_recovery;
pub mod costas_loop;
pub mod decimator;
pub mod design;
pub mod filter;
pub mod interpolator;
pub mod nco;
mod polyphase;

// Re-export commonly used items
pub use clock_recovery::ClockRecovery;
pub use costas_loop::CostasLoop;
pub use decimator::PolyphaseDecimator;
pub use filter::FirFilter;
pub use interpolator::PolyphaseInterpolator;
pub use nco::Nco;
