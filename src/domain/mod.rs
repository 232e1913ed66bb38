//! Core domain types
//!
//! Pure types with no I/O dependencies: samples, diagnostic events,
//! errors and configuration for the receiver chain.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
