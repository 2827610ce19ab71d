//! Fluid-mesh projection: a 3-D height field over an extended domain.
//!
//! Control points sample the same phasor-magnitude field as the standing
//! projection, but with the radial basis `cos(k·d·5) + cos(k·x·2)` and a
//! two-piece compression — gentle near zero, super-linear past a knee — that
//! gives the surface its shear-thickening look: calm water with abrupt
//! standing peaks. Points pass through the shared rotating camera and the
//! quads between them are emitted back-to-front for painter's filling.

use std::f32::consts::TAU;

use crate::bank::Oscillator;
use crate::field;

use super::camera::Camera;
use super::{Quad, Rgb, ViewState, Viewport};

const DEEP: Rgb = Rgb(10, 30, 70);
const CREST: Rgb = Rgb(150, 230, 255);

/// Control points per side.
const GRID: usize = 40;
/// Half-extent of the sampled domain in model units; spans several
/// pool-widths so the horizon recedes under perspective.
const DOMAIN: f32 = 2.4;
/// Fixed downward tilt of the camera.
const TILT: f32 = 0.9;
/// Temporal rotation rate handed to the phasor.
const SPIN_RATE: f32 = 0.8;
/// Normalized-magnitude knee of the two-piece compression.
const KNEE: f32 = 0.55;
/// Slope of the sub-knee (smooth) piece.
const SOFT_GAIN: f32 = 0.35;
/// Gain of the super-linear piece above the knee.
const HARD_GAIN: f32 = 2.2;
/// Basis peak |cos + cos| for magnitude normalization.
const BASIS_PEAK: f32 = 2.0;

/// Two-piece height compression: quadratic ease below the knee, 1.6-power
/// growth above it.
fn compress(magnitude: f32) -> f32 {
    let m = magnitude.clamp(0.0, 1.0);
    if m < KNEE {
        SOFT_GAIN * m * m / KNEE
    } else {
        SOFT_GAIN * KNEE + HARD_GAIN * (m - KNEE).powf(1.6)
    }
}

pub fn render(
    oscillators: &[Oscillator],
    time: f32,
    viewport: Viewport,
    view: ViewState,
) -> Vec<Quad> {
    let total = field::total_amplitude(oscillators);
    let camera = Camera::new(view.yaw, TILT, view.zoom * 0.6);

    // Sample heights at (GRID+1)^2 control points.
    let side = GRID + 1;
    let mut heights = vec![0.0f32; side * side];
    if total > 0.0 {
        for gy in 0..side {
            let z = (gy as f32 / GRID as f32 - 0.5) * 2.0 * DOMAIN;
            for gx in 0..side {
                let x = (gx as f32 / GRID as f32 - 0.5) * 2.0 * DOMAIN;
                let d = (x * x + z * z).sqrt();
                let magnitude = field::phasor(oscillators, time, SPIN_RATE, |o| {
                    let k = TAU * o.frequency;
                    (k * d * 5.0).cos() + (k * x * 2.0).cos()
                })
                .norm();
                heights[gy * side + gx] = compress(magnitude / (BASIS_PEAK * total));
            }
        }
    }

    // Project control points once, keeping depth for ordering and fog.
    let mut projected = Vec::with_capacity(side * side);
    for gy in 0..side {
        let z = (gy as f32 / GRID as f32 - 0.5) * 2.0 * DOMAIN;
        for gx in 0..side {
            let x = (gx as f32 / GRID as f32 - 0.5) * 2.0 * DOMAIN;
            let h = heights[gy * side + gx];
            projected.push(camera.project([x * 0.4, h, z * 0.4], viewport));
        }
    }

    // Emit quads back-to-front by mean projected depth.
    let mut quads: Vec<(f32, Quad)> = Vec::with_capacity(GRID * GRID);
    for gy in 0..GRID {
        for gx in 0..GRID {
            let i00 = gy * side + gx;
            let i10 = i00 + 1;
            let i01 = i00 + side;
            let i11 = i01 + 1;
            let corners = [
                projected[i00].0,
                projected[i10].0,
                projected[i11].0,
                projected[i01].0,
            ];
            let depth =
                (projected[i00].1 + projected[i10].1 + projected[i11].1 + projected[i01].1) / 4.0;
            let peak = heights[i00]
                .max(heights[i10])
                .max(heights[i11])
                .max(heights[i01]);

            // Depth fog dims and fades distant quads; height brightens crests.
            let fog = (1.0 - depth / (DOMAIN * 1.6)).clamp(0.3, 1.0);
            let color = DEEP.lerp(CREST, peak.clamp(0.0, 1.0)).scale(fog);
            let opacity = (0.35 + peak * 0.8).clamp(0.0, 1.0) * fog;

            quads.push((
                depth,
                Quad {
                    corners,
                    color,
                    opacity,
                },
            ));
        }
    }
    quads.sort_by(|a, b| b.0.total_cmp(&a.0));
    quads.into_iter().map(|(_, q)| q).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::OscillatorBank;

    const VIEW: Viewport = Viewport {
        width: 80,
        height: 60,
    };

    #[test]
    fn compression_is_monotonic_and_continuous_at_the_knee() {
        let mut prev = -1.0f32;
        for i in 0..=100 {
            let h = compress(i as f32 / 100.0);
            assert!(h >= prev, "compress must be monotonic");
            prev = h;
        }
        let below = compress(KNEE - 1e-4);
        let above = compress(KNEE + 1e-4);
        assert!((above - below).abs() < 1e-2, "knee must not jump");
    }

    #[test]
    fn super_linear_growth_past_the_knee() {
        let low = compress(0.3) / 0.3;
        let high = (compress(1.0) - compress(0.8)) / 0.2;
        assert!(
            high > low * 2.0,
            "slope above the knee ({high}) should dwarf the calm slope ({low})"
        );
    }

    #[test]
    fn empty_bank_yields_a_flat_sheet() {
        let quads = render(&[], 2.0, VIEW, ViewState::default());
        assert_eq!(quads.len(), GRID * GRID);
        for q in &quads {
            assert!(q.corners.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
            // Every quad sits at height zero: deep-water shades only, and
            // opacity never exceeds the calm-water floor.
            assert!(q.color.2 >= q.color.1 && q.color.1 >= q.color.0);
            assert!(q.opacity > 0.0 && q.opacity <= 0.35 + 1e-5);
        }
    }

    #[test]
    fn quads_are_ordered_back_to_front() {
        // On the flat sheet opacity is pure depth fog, so painter ordering
        // shows up as non-decreasing opacity through the emitted list.
        let view = ViewState {
            yaw: 0.7,
            ..ViewState::default()
        };
        let quads = render(&[], 1.0, VIEW, view);
        for pair in quads.windows(2) {
            assert!(
                pair[1].opacity >= pair[0].opacity - 1e-5,
                "front quad fainter than the one behind it"
            );
        }
    }

    #[test]
    fn heights_respond_to_the_bank() {
        let mut bank = OscillatorBank::new();
        bank.replace_all(&[(3.0, 90.0, 0.0)]);
        let flat = render(&[], 1.0, VIEW, ViewState::default());
        let waved = render(bank.oscillators(), 1.0, VIEW, ViewState::default());
        assert_ne!(flat, waved);
    }
}
