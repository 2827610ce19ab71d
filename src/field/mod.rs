//! Shared field evaluators.
//!
//! Every projection reduces to one of two primitives: a scalar time-domain
//! sum (`time_value`) or a complex phasor accumulation (`phasor`). Both are
//! pure functions of the bank, the simulation time, and a coordinate, so a
//! renderer invoked twice with identical inputs produces identical buffers.

use rustfft::num_complex::Complex;
use std::f32::consts::TAU;

use crate::bank::{Oscillator, AMP_MAX};

/// Combined amplitude above which the trace is scaled back into view, so
/// many constructively stacked oscillators do not clip vertically.
const HEADROOM_AMP: f32 = 120.0;

/// Drift rate of the time trace in radians per simulation second. Applied
/// with a minus sign so the waveform slides continuously leftward.
const TRACE_DRIFT: f32 = 2.0;

/// Sum of active amplitudes, the normalization basis for every projection.
pub fn total_amplitude(oscillators: &[Oscillator]) -> f32 {
    oscillators
        .iter()
        .filter(|o| o.is_active())
        .map(|o| o.amplitude)
        .sum()
}

/// Evaluate the composite waveform at normalized horizontal position
/// `t_sample` in [0, 1], drifting with simulation time `time`.
///
/// Returns 0 when no oscillator is active.
pub fn time_value(oscillators: &[Oscillator], time: f32, t_sample: f32) -> f32 {
    let total = total_amplitude(oscillators);
    if total <= 0.0 {
        return 0.0;
    }
    let scale = (HEADROOM_AMP / total).min(1.0);

    oscillators
        .iter()
        .filter(|o| o.is_active())
        .map(|o| {
            let angle = TAU * o.frequency * t_sample + o.phase_radians() - TRACE_DRIFT * time;
            (o.amplitude / AMP_MAX) * angle.sin()
        })
        .sum::<f32>()
        * scale
}

/// Accumulate the bank into a complex phasor at one spatial sample.
///
/// Each active oscillator contributes `amplitude·basis(osc)` rotated to
/// `θ = phase − time·frequency·rate`. Callers take the magnitude, which is
/// phase-insensitive: the rendered field breathes with `time` instead of
/// strobing at the oscillator frequency.
pub fn phasor<F>(oscillators: &[Oscillator], time: f32, rate: f32, mut basis: F) -> Complex<f32>
where
    F: FnMut(&Oscillator) -> f32,
{
    let mut acc = Complex::new(0.0f32, 0.0);
    for o in oscillators.iter().filter(|o| o.is_active()) {
        let theta = o.phase_radians() - time * o.frequency * rate;
        let weight = o.amplitude * basis(o);
        acc.re += weight * theta.cos();
        acc.im += weight * theta.sin();
    }
    acc
}
