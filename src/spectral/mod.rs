//! Direct Fourier analysis of a sampled signal.
//!
//! The analyzer turns an arbitrary real-valued signal (the drawing surface
//! supplies N samples in [0, 1]) into a ranked sequence of spectral
//! components, and reconstructs an approximation from any prefix of that
//! sequence. The transform is the direct O(N·K) form: K stays small (tens to
//! a few hundred components) relative to N, so an FFT buys nothing here and
//! the direct sum keeps the per-harmonic doubling and DC handling explicit.

use rustfft::num_complex::Complex;
use std::f32::consts::TAU;

use crate::bank::{OscParams, OscillatorBank, AMP_MAX};

/// One term of a discrete Fourier decomposition.
///
/// `harmonic` is the integer cycle count across the analyzed window, not a
/// physical frequency; harmonic 0 is the DC/mean term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralComponent {
    pub harmonic: usize,
    pub amplitude: f32,
    pub phase_radians: f32,
}

/// Decompose `signal` into its first `max_components` harmonics, ordered by
/// harmonic index ascending.
///
/// The signal is treated as one period of a periodic waveform. Amplitudes
/// for harmonics above DC are doubled: a real signal's energy at harmonic k
/// splits evenly across the mirrored negative-frequency term, and the
/// mirror is folded back in here. The DC term is not doubled.
///
/// An empty signal yields an empty decomposition.
pub fn analyze(signal: &[f32], max_components: usize) -> Vec<SpectralComponent> {
    if signal.is_empty() {
        return Vec::new();
    }
    let n = signal.len() as f32;

    (0..max_components)
        .map(|k| {
            let mut coeff = Complex::new(0.0f32, 0.0);
            for (i, &sample) in signal.iter().enumerate() {
                let angle = TAU * k as f32 * i as f32 / n;
                coeff.re += sample * angle.cos();
                coeff.im -= sample * angle.sin();
            }
            coeff /= n;

            let mut amplitude = coeff.norm();
            if k > 0 {
                amplitude *= 2.0;
            }
            SpectralComponent {
                harmonic: k,
                amplitude,
                phase_radians: coeff.im.atan2(coeff.re),
            }
        })
        .collect()
}

/// Evaluate the partial sum of the first `count` components at `t` in [0, 1].
///
/// Every term is `amplitude·cos(2π·k·t + phase)`; at k = 0 that collapses to
/// the flat DC level `amplitude·cos(phase)`, which recovers the signed mean.
pub fn reconstruct(components: &[SpectralComponent], count: usize, t: f32) -> f32 {
    components
        .iter()
        .take(count)
        .map(|c| c.amplitude * (TAU * c.harmonic as f32 * t + c.phase_radians).cos())
        .sum()
}

/// Derive an oscillator bank from a sampled signal.
///
/// Harmonics above DC become oscillators: harmonic index maps to frequency,
/// amplitudes are rescaled so the strongest component sits at full scale,
/// and phases convert to degrees. Components below 1% of the strongest are
/// dropped as analysis noise. The DC term carries no oscillation and is
/// discarded.
pub fn bank_from_signal(signal: &[f32], max_components: usize) -> OscillatorBank {
    let components = analyze(signal, max_components);
    let mut bank = OscillatorBank::new();

    let peak = components
        .iter()
        .filter(|c| c.harmonic > 0)
        .map(|c| c.amplitude)
        .fold(0.0f32, f32::max);
    if peak <= 0.0 {
        return bank;
    }

    for c in components.iter().filter(|c| c.harmonic > 0) {
        let amplitude = c.amplitude / peak * AMP_MAX;
        if amplitude < AMP_MAX * 0.01 {
            continue;
        }
        bank.add(OscParams::new(
            c.harmonic as f32,
            amplitude,
            c.phase_radians.to_degrees(),
        ));
    }
    bank
}
