//! Port traits (interfaces)
//!
//! These traits define the boundaries between the signal chain and whatever
//! observes it. Adapters implement them.

pub mod probe;

pub use probe::*;
