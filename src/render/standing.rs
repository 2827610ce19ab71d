//! Standing-field projection: a cymatics-style scalar field.
//!
//! Each grid cell accumulates the bank's phasor with the plate-mode basis
//! `cos(k·x) + cos(k·y)`, `k = 2π·frequency`. The magnitude is normalized
//! by the total active amplitude, pushed through a contrast exponent, and
//! mapped onto a quiet-to-loud two-color gradient. Zoom and pan become an
//! affine transform of the grid coordinates before evaluation.

use std::f32::consts::TAU;

use crate::bank::Oscillator;
use crate::field;

use super::{PixelGrid, Rgb, ViewState, Viewport};

const QUIET: Rgb = Rgb(6, 10, 32);
const LOUD: Rgb = Rgb(120, 220, 255);
/// Contrast exponent applied to the normalized magnitude.
const CONTRAST: f32 = 1.35;
/// Temporal rotation rate handed to the phasor.
const SPIN_RATE: f32 = 1.0;
/// Peak of |cos + cos|, the basis normalization factor.
const BASIS_PEAK: f32 = 2.0;

pub fn render(
    oscillators: &[Oscillator],
    time: f32,
    viewport: Viewport,
    view: ViewState,
) -> PixelGrid {
    let mut grid = PixelGrid::new(viewport.width, viewport.height, QUIET);
    let total = field::total_amplitude(oscillators);
    if total <= 0.0 {
        return grid; // uniform quiet field
    }

    let w = viewport.width.max(1) as f32;
    let h = viewport.height.max(1) as f32;
    let zoom = view.zoom.max(1e-3);

    for row in 0..viewport.height {
        let y = ((row as f32 + 0.5) / h - 0.5) / zoom - view.pan_y;
        for col in 0..viewport.width {
            let x = ((col as f32 + 0.5) / w - 0.5) / zoom - view.pan_x;

            let magnitude = field::phasor(oscillators, time, SPIN_RATE, |o| {
                let k = TAU * o.frequency;
                (k * x).cos() + (k * y).cos()
            })
            .norm();

            let level = (magnitude / (BASIS_PEAK * total)).clamp(0.0, 1.0).powf(CONTRAST);
            grid.set(col, row, QUIET.lerp(LOUD, level));
        }
    }
    grid
}
