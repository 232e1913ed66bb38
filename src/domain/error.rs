//! Domain error types

use thiserror::Error;

/// Errors raised while building receiver blocks.
///
/// The streaming path never fails; every variant comes from construction-time
/// validation or from loading/saving a configuration profile.
#[derive(Error, Debug)]
pub enum RxError {
    #[error("Filter error: {0}")]
    Filter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Waveform error: {0}")]
    Waveform(String),
}

/// Result type alias for receiver operations
pub type RxResult<T> = Result<T, RxError>;
