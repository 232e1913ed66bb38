//! Adapters: implementations of the port traits

pub mod log_probe;
pub mod memory_probe;

pub use log_probe::LogProbe;
pub use memory_probe::MemoryProbe;
