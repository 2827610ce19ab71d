//! Ripple-tank projection: damped radial waves in a circular pool.
//!
//! Every oscillator radiates an outward traveling wave from a pannable
//! center plus a damped inward wave reflected off the pool wall, modeled by
//! the reflected path length `2·R − r`. The summed height field is shaded
//! with a finite-difference gradient against a fixed light: diffuse dot
//! product plus a sharpened specular term. Cells outside the pool stay
//! plain background.

use std::f32::consts::TAU;

use crate::bank::{Oscillator, AMP_MAX};
use crate::field;

use super::{PixelGrid, Rgb, ViewState, Viewport};

const BACKGROUND: Rgb = Rgb(12, 12, 16);
const WATER: Rgb = Rgb(24, 90, 160);
const SPECULAR: Rgb = Rgb(255, 255, 240);

/// Pool radius in normalized view units (half-extent of the short axis).
const POOL_RADIUS: f32 = 0.92;
/// Fraction of wave energy surviving the boundary reflection.
const REFLECT_DAMPING: f32 = 0.7;
/// Temporal angular rate per unit frequency.
const ANGULAR_RATE: f32 = 2.0;
/// Spatial frequency multiplier: rings per unit radius per unit frequency.
const WAVE_SCALE: f32 = 1.5;
/// Finite-difference step for the height gradient.
const GRAD_EPS: f32 = 0.02;
/// Light direction, normalized at use.
const LIGHT: [f32; 3] = [-0.45, -0.6, 0.75];
/// Specular sharpening exponent.
const SHININESS: i32 = 14;

/// Pool height at radius `r`: outward wave plus damped boundary reflection.
fn height(oscillators: &[Oscillator], time: f32, r: f32) -> f32 {
    oscillators
        .iter()
        .filter(|o| o.is_active())
        .map(|o| {
            let k = TAU * o.frequency * WAVE_SCALE;
            let omega = o.frequency * ANGULAR_RATE;
            let phase = o.phase_radians();
            let outward = (k * r - omega * time + phase).sin();
            let reflected = (k * (2.0 * POOL_RADIUS - r) - omega * time + phase).sin();
            (o.amplitude / AMP_MAX) * (outward + REFLECT_DAMPING * reflected)
        })
        .sum()
}

pub fn render(
    oscillators: &[Oscillator],
    time: f32,
    viewport: Viewport,
    view: ViewState,
) -> PixelGrid {
    let mut grid = PixelGrid::new(viewport.width, viewport.height, BACKGROUND);
    let total = field::total_amplitude(oscillators);

    let w = viewport.width.max(1) as f32;
    let h = viewport.height.max(1) as f32;
    let aspect = w / h;
    // Height normalization: worst case every wave and its reflection align.
    let norm = if total > 0.0 {
        (total / AMP_MAX) * (1.0 + REFLECT_DAMPING)
    } else {
        1.0
    };

    let light_len = (LIGHT[0] * LIGHT[0] + LIGHT[1] * LIGHT[1] + LIGHT[2] * LIGHT[2]).sqrt();
    let light = [LIGHT[0] / light_len, LIGHT[1] / light_len, LIGHT[2] / light_len];

    for row in 0..viewport.height {
        let y = ((row as f32 + 0.5) / h - 0.5) * 2.0;
        for col in 0..viewport.width {
            let x = ((col as f32 + 0.5) / w - 0.5) * 2.0 * aspect;
            let dx = x - view.pan_x;
            let dy = y - view.pan_y;
            let r = (dx * dx + dy * dy).sqrt();
            if r > POOL_RADIUS {
                continue;
            }
            if total <= 0.0 {
                // Flat pool: still water, no waves to shade.
                grid.set(col, row, WATER.scale(0.55));
                continue;
            }

            // Central-difference gradient along the radial direction,
            // rotated back into x/y through the unit radial vector.
            let h0 = height(oscillators, time, (r - GRAD_EPS).max(0.0)) / norm;
            let h1 = height(oscillators, time, (r + GRAD_EPS).min(POOL_RADIUS)) / norm;
            let dh_dr = (h1 - h0) / (2.0 * GRAD_EPS);
            let (ux, uy) = if r > 1e-5 { (dx / r, dy / r) } else { (0.0, 0.0) };
            let grad = (dh_dr * ux * 0.35, dh_dr * uy * 0.35);

            // Surface normal from the gradient, unit light already fixed.
            let nl = (grad.0 * grad.0 + grad.1 * grad.1 + 1.0).sqrt();
            let normal = [-grad.0 / nl, -grad.1 / nl, 1.0 / nl];
            let diffuse = (normal[0] * light[0] + normal[1] * light[1] + normal[2] * light[2])
                .clamp(0.0, 1.0);
            let spec = diffuse.powi(SHININESS);

            let lit = WATER.scale(0.3 + 0.7 * diffuse);
            grid.set(col, row, lit.lerp(SPECULAR, spec * 0.6));
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::OscillatorBank;

    const VIEW: Viewport = Viewport {
        width: 40,
        height: 40,
    };

    #[test]
    fn cells_outside_the_pool_stay_background() {
        let mut bank = OscillatorBank::new();
        bank.replace_all(&[(3.0, 80.0, 0.0)]);
        let grid = render(bank.oscillators(), 1.0, VIEW, ViewState::default());
        assert_eq!(grid.get(0, 0), BACKGROUND, "corner lies outside the pool");
        assert_ne!(grid.get(20, 20), BACKGROUND, "center lies inside the pool");
    }

    #[test]
    fn empty_bank_renders_a_still_pool() {
        let grid = render(&[], 4.2, VIEW, ViewState::default());
        let center = grid.get(20, 20);
        assert_ne!(center, BACKGROUND);
        // Still water is uniform across the interior.
        assert_eq!(grid.get(18, 22), center);
    }

    #[test]
    fn reflection_contributes_damped_energy() {
        let mut bank = OscillatorBank::new();
        bank.replace_all(&[(2.0, 100.0, 0.0)]);
        // Height at the wall combines outward and reflected identically
        // (r = 2R - r there), so the sum is (1 + damping) times one wave.
        let at_wall = height(bank.oscillators(), 0.3, POOL_RADIUS);
        let single = {
            let k = TAU * 2.0 * WAVE_SCALE;
            let omega = 2.0 * ANGULAR_RATE;
            (k * POOL_RADIUS - omega * 0.3).sin()
        };
        assert!((at_wall - single * (1.0 + REFLECT_DAMPING)).abs() < 1e-4);
    }

    #[test]
    fn waves_move_with_time() {
        let mut bank = OscillatorBank::new();
        bank.replace_all(&[(3.0, 80.0, 0.0)]);
        let a = render(bank.oscillators(), 0.0, VIEW, ViewState::default());
        let b = render(bank.oscillators(), 0.8, VIEW, ViewState::default());
        assert_ne!(a, b, "traveling waves must advance");
    }

    #[test]
    fn pan_moves_the_wave_center() {
        let mut bank = OscillatorBank::new();
        bank.replace_all(&[(3.0, 80.0, 0.0)]);
        let base = render(bank.oscillators(), 0.5, VIEW, ViewState::default());
        let panned = render(
            bank.oscillators(),
            0.5,
            VIEW,
            ViewState {
                pan_x: 0.3,
                ..ViewState::default()
            },
        );
        assert_ne!(base, panned);
    }
}
