//! Phase-plane projection: a trailing Lissajous curve.
//!
//! The first active oscillator drives the X axis; the normalized sum of all
//! remaining active oscillators drives Y. The curve sweeps a receding window
//! of simulation time ending at the current instant, so commensurate
//! frequency ratios close into stable figures while irrational ratios
//! precess.

use std::f32::consts::TAU;

use crate::bank::Oscillator;

use super::{ViewState, Viewport};

/// Samples in the trailing polyline.
const TRAIL_POINTS: usize = 500;
/// Length of the receding history window, in simulation seconds.
const TRAIL_SECONDS: f32 = 2.0;

pub fn render(
    oscillators: &[Oscillator],
    time: f32,
    viewport: Viewport,
    view: ViewState,
) -> Vec<(f32, f32)> {
    let active: Vec<&Oscillator> = oscillators.iter().filter(|o| o.is_active()).collect();
    let (x_osc, rest) = match active.split_first() {
        Some((first, rest)) => (Some(*first), rest),
        None => (None, &[][..]),
    };
    let rest_total: f32 = rest.iter().map(|o| o.amplitude).sum();

    let radius = viewport.width.min(viewport.height) as f32 * 0.45;
    let cx = viewport.width as f32 * 0.5;
    let cy = viewport.height as f32 * 0.5;

    (0..TRAIL_POINTS)
        .map(|i| {
            let frac = i as f32 / (TRAIL_POINTS - 1) as f32;
            let tau = time - TRAIL_SECONDS * (1.0 - frac);

            let x = match x_osc {
                Some(o) => (TAU * o.frequency * tau + o.phase_radians()).sin(),
                None => 0.0,
            };
            let y = if rest_total > 0.0 {
                rest.iter()
                    .map(|o| o.amplitude * (TAU * o.frequency * tau + o.phase_radians()).sin())
                    .sum::<f32>()
                    / rest_total
            } else {
                0.0
            };

            let px = cx + (x * view.zoom + view.pan_x) * radius;
            let py = cy - (y * view.zoom + view.pan_y) * radius;
            (px, py)
        })
        .collect()
}
