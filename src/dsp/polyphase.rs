//! Polyphase decomposition shared by the decimator and interpolator

use super::filter::FirFilter;
use crate::domain::{RxError, RxResult};

/// Split `taps` into `factor` phase filters.
///
/// The prototype is zero-padded at the tail to a multiple of `factor`;
/// branch `i` holds `taps[i], taps[i + factor], taps[i + 2·factor], ...`.
pub(crate) fn phase_bank(factor: usize, taps: &[f64]) -> RxResult<Vec<FirFilter>> {
    if factor == 0 {
        return Err(RxError::Filter("Polyphase factor must be at least 1".into()));
    }
    if taps.is_empty() {
        return Err(RxError::Filter("Polyphase prototype needs at least one tap".into()));
    }

    let num_taps = taps.len().div_ceil(factor) * factor;
    let mut padded = vec![0.0; num_taps];
    padded[..taps.len()].copy_from_slice(taps);

    (0..factor)
        .map(|phase| {
            let branch: Vec<f64> = padded.iter().skip(phase).step_by(factor).copied().collect();
            FirFilter::from_real(&branch)
        })
        .collect()
}
