//! Filter tap design
//!
//! Prototype tap vectors for the polyphase banks and the test-signal
//! pulse shaper.

use std::f64::consts::PI;

/// Windowed-sinc lowpass with a Hanning window and unity DC gain.
///
/// `cutoff` is normalized to the sample rate (0.5 = Nyquist). Used as an
/// interpolation prototype at the upsampled rate: design it at
/// `0.5 / factor` and scale by `factor` to keep the passband gain at one.
pub fn lowpass(cutoff: f64, num_taps: usize) -> Vec<f64> {
    let mut coefficients = vec![0.0; num_taps];
    let middle = num_taps / 2;

    for (i, coefficient) in coefficients.iter_mut().enumerate() {
        let n = i as f64 - middle as f64;
        let sinc = if n == 0.0 {
            2.0 * cutoff
        } else {
            (2.0 * PI * cutoff * n).sin() / (PI * n)
        };

        let window = 0.5 * (1.0 - (2.0 * PI * i as f64 / num_taps as f64).cos());
        *coefficient = sinc * window;
    }

    let sum: f64 = coefficients.iter().sum();
    if sum.abs() > 1e-12 {
        for c in &mut coefficients {
            *c /= sum;
        }
    }

    coefficients
}

/// Zero-order hold of length `factor`: every polyphase branch becomes a
/// single unity tap, so each interpolated phase repeats the input sample.
pub fn zero_order_hold(factor: usize) -> Vec<f64> {
    vec![1.0; factor]
}

/// Root-raised-cosine impulse response.
///
/// Sampled at `t = (n - num_taps/2) / fs` for `n` in `0..num_taps`, with
/// symbol period `ts`. Not normalized; the continuous response peaks at
/// `1 - alpha + 4·alpha/π` at `t = 0`, which is only sampled for even
/// `num_taps`.
pub fn root_raised_cosine(num_taps: usize, alpha: f64, ts: f64, fs: f64) -> Vec<f64> {
    let t_delta = 1.0 / fs;
    let half = num_taps as f64 / 2.0;

    (0..num_taps)
        .map(|n| {
            let t = (n as f64 - half) * t_delta;

            if t == 0.0 {
                1.0 - alpha + 4.0 * alpha / PI
            } else if alpha != 0.0 && (t.abs() - ts / (4.0 * alpha)).abs() < 1e-12 {
                // t = ±Ts/(4α), where the general form is 0/0
                (alpha / 2.0_f64.sqrt())
                    * ((1.0 + 2.0 / PI) * (PI / (4.0 * alpha)).sin()
                        + (1.0 - 2.0 / PI) * (PI / (4.0 * alpha)).cos())
            } else {
                let x = PI * t / ts;
                let scale = 4.0 * alpha * t / ts;
                ((x * (1.0 - alpha)).sin() + scale * (x * (1.0 + alpha)).cos())
                    / (x * (1.0 - scale * scale))
            }
        })
        .collect()
}
