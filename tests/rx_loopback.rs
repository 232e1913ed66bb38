//! Integration tests: waveform generator → receiver loopback
//!
//! These tests shape random BPSK symbols into an oversampled waveform with
//! a carrier offset, run it through the full receive chain and check that
//! the transmitted symbols come back out once the loops have locked.

use std::f64::consts::TAU;

use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use psk_rx::domain::{CostasConfig, DecimationConfig, ReceiverConfig, TimingConfig, WaveformConfig};
use psk_rx::dsp::{design, PolyphaseDecimator};
use psk_rx::modem::{Receiver, WaveformGenerator};
use psk_rx::Sample;

/// Symbols ignored while the loops pull in
const SETTLE: usize = 150;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_bpsk(count: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
        .collect()
}

/// RRC matched to the generator's pulse, scaled so a full symbol peaks at 1
fn matched_filter(oversampling: usize) -> Vec<f64> {
    let pulse = design::root_raised_cosine(101, 0.35, 1.0, oversampling as f64);
    let energy: f64 = pulse.iter().map(|t| t * t).sum();
    pulse.iter().map(|t| t / energy).collect()
}

fn matched_receiver(oversampling: usize) -> ReceiverConfig {
    ReceiverConfig {
        name: "Loopback".to_string(),
        prefilter_taps: Some(matched_filter(oversampling)),
        ..ReceiverConfig::default()
    }
}

/// Fraction of settled symbols whose sign matches the transmitted symbol
/// `lag` positions later, folded over the Costas 180° ambiguity
fn sign_agreement(bits: &[f64], recovered: &[Sample], lag: isize) -> f64 {
    let mut total = 0usize;
    let mut agree = 0usize;
    for (i, symbol) in recovered.iter().enumerate().skip(SETTLE) {
        let j = i as isize + lag;
        if j < 0 || j as usize >= bits.len() {
            continue;
        }
        total += 1;
        if symbol.re.signum() == bits[j as usize] {
            agree += 1;
        }
    }
    let fraction = agree as f64 / total as f64;
    fraction.max(1.0 - fraction)
}

/// Generate a waveform, drop the first `skip` samples, and receive it
fn loopback(
    waveform: WaveformConfig,
    receiver: &ReceiverConfig,
    bits: &[f64],
    skip: usize,
) -> (Vec<Sample>, Receiver) {
    let samples = WaveformGenerator::new(waveform)
        .unwrap()
        .generate(bits)
        .unwrap();
    let mut rx = Receiver::new(receiver).unwrap();
    let recovered = rx.process_block(&samples[skip..]);
    (recovered, rx)
}

#[test]
fn test_loopback_noiseless_with_frequency_offset() {
    init_logging();
    let bits = random_bpsk(600, 1);
    let waveform = WaveformConfig {
        oversampling: 8,
        frequency_offset: 0.0005,
        ..WaveformConfig::default()
    };

    // Pulse and matched filter together peak 101 samples after each
    // symbol, dropping those puts the first strobe on a peak
    let (recovered, rx) = loopback(waveform, &matched_receiver(8), &bits, 101);

    assert_eq!(recovered.len(), 600, "one symbol per 8 input samples");

    let agreement = sign_agreement(&bits, &recovered, 0);
    assert!(agreement >= 0.99, "Expected lock, got {agreement:.3} agreement");

    // 0.0005 cycles/sample at 8 samples/symbol, in rad/symbol
    let expected = TAU * 0.0005 * 8.0;
    let estimate = rx.costas_loop().frequency();
    assert!(
        (estimate - expected).abs() < 1e-4,
        "frequency estimate {estimate} should approach {expected}"
    );

    for symbol in &recovered[recovered.len() - 100..] {
        assert!(symbol.im.abs() < 0.01, "symbol off the real axis: {symbol}");
        assert!(symbol.re.abs() > 0.9, "symbol not at a pulse peak: {symbol}");
    }
}

#[test]
fn test_loopback_full_capture_delays_symbols() {
    init_logging();
    let bits = random_bpsk(600, 4);
    let waveform = WaveformConfig {
        frequency_offset: 0.0005,
        ..WaveformConfig::default()
    };

    // Untrimmed: strobes at samples 0, 8, ..., 96 land before the first
    // symbol peak at 101, so the recovered stream runs 13 symbols behind
    let (recovered, _) = loopback(waveform, &matched_receiver(8), &bits, 0);

    let agreement = sign_agreement(&bits, &recovered, -13);
    assert!(agreement >= 0.95, "Expected lock, got {agreement:.3} agreement");
}

#[test]
fn test_loopback_with_noise() {
    init_logging();
    let bits = random_bpsk(600, 2);
    let waveform = WaveformConfig {
        frequency_offset: 0.0005,
        ebn0_db: Some(10.0),
        seed: 17,
        ..WaveformConfig::default()
    };

    let (recovered, rx) = loopback(waveform, &matched_receiver(8), &bits, 101);

    let agreement = sign_agreement(&bits, &recovered, 0);
    assert!(agreement >= 0.98, "Expected lock at 10 dB, got {agreement:.3} agreement");

    let expected = TAU * 0.0005 * 8.0;
    let estimate = rx.costas_loop().frequency();
    assert!(
        (estimate - expected).abs() < 0.015,
        "frequency estimate {estimate} should stay near {expected}"
    );
}

#[test]
fn test_loopback_through_decimator() {
    init_logging();
    let bits = random_bpsk(600, 3);
    let waveform = WaveformConfig {
        oversampling: 16,
        frequency_offset: 0.00025,
        ..WaveformConfig::default()
    };
    let receiver = ReceiverConfig {
        name: "Decimating".to_string(),
        prefilter_taps: Some(matched_filter(16)),
        decimation: Some(DecimationConfig {
            factor: 2,
            taps: design::lowpass(0.25, 31),
        }),
        timing: TimingConfig {
            input_rate: 8,
            ..TimingConfig::default()
        },
        costas: CostasConfig::default(),
    };

    // Matched filter (101) plus lowpass group delay (15) puts the first
    // peak 116 samples in; dropping 115 aligns it with a decimated output
    let (recovered, rx) = loopback(waveform, &receiver, &bits, 115);

    assert!(
        (598..=600).contains(&recovered.len()),
        "one symbol per 16 input samples, got {}",
        recovered.len()
    );
    let agreement = sign_agreement(&bits, &recovered, 0);
    assert!(agreement >= 0.99, "Expected lock, got {agreement:.3} agreement");

    let expected = TAU * 0.00025 * 16.0;
    let estimate = rx.costas_loop().frequency();
    assert!(
        (estimate - expected).abs() < 1e-4,
        "frequency estimate {estimate} should approach {expected}"
    );
}

#[test]
fn test_decimator_impulse_train() {
    let mut decimator = PolyphaseDecimator::new(4, &[1.0; 4]).unwrap();
    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    let input: Vec<Sample> = [one, zero, zero, zero].repeat(3);

    let outputs = decimator.process_block(&input);
    assert_eq!(outputs, vec![one; 3]);
}

#[test]
fn test_saved_profile_rebuilds_identical_receiver() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loopback.json");

    let config = matched_receiver(8);
    config.save(&path).unwrap();
    let loaded = ReceiverConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let bits = random_bpsk(200, 5);
    let waveform = WaveformConfig {
        frequency_offset: 0.0005,
        ..WaveformConfig::default()
    };
    let (a, _) = loopback(waveform.clone(), &config, &bits, 101);
    let (b, _) = loopback(waveform, &loaded, &bits, 101);
    assert_eq!(a, b);
}
