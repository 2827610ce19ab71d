//! Phase-volume projection: a 3-D Lissajous curve.
//!
//! The first three active oscillators each drive one axis; missing axes are
//! held at zero, flattening the curve rather than failing. The swept curve
//! is projected through the shared rotating camera; the host advances the
//! yaw while the view's spin mode is `Auto` and freezes it on manual drag.

use std::f32::consts::TAU;

use crate::bank::Oscillator;

use super::camera::Camera;
use super::{ViewState, Viewport};

/// Points in the swept curve.
const SWEEP_POINTS: usize = 1200;
/// Length of the swept window, in simulation seconds: several cycles at the
/// typical 1-10 frequency range.
const SWEEP_SECONDS: f32 = 6.0;
/// Model cycles per unit frequency per simulation second.
const AXIS_RATE: f32 = TAU * 0.5;

pub fn render(
    oscillators: &[Oscillator],
    time: f32,
    viewport: Viewport,
    view: ViewState,
) -> Vec<(f32, f32)> {
    let mut axes: [Option<&Oscillator>; 3] = [None; 3];
    for (slot, osc) in axes
        .iter_mut()
        .zip(oscillators.iter().filter(|o| o.is_active()))
    {
        *slot = Some(osc);
    }

    let camera = Camera::new(view.yaw, view.pitch, view.zoom * 0.75);
    let axis_value = |axis: Option<&Oscillator>, tau: f32| -> f32 {
        match axis {
            Some(o) => (o.frequency * tau * AXIS_RATE + o.phase_radians()).sin(),
            None => 0.0,
        }
    };

    (0..SWEEP_POINTS)
        .map(|i| {
            let frac = i as f32 / (SWEEP_POINTS - 1) as f32;
            let tau = time - SWEEP_SECONDS * (1.0 - frac);
            let point = [
                axis_value(axes[0], tau),
                axis_value(axes[1], tau),
                axis_value(axes[2], tau),
            ];
            camera.project(point, viewport).0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::OscillatorBank;

    const VIEW: Viewport = Viewport {
        width: 120,
        height: 120,
    };

    #[test]
    fn empty_bank_collapses_to_the_center() {
        let points = render(&[], 2.0, VIEW, ViewState::default());
        assert_eq!(points.len(), SWEEP_POINTS);
        assert!(points
            .iter()
            .all(|&(x, y)| (x - 60.0).abs() < 1e-3 && (y - 60.0).abs() < 1e-3));
    }

    #[test]
    fn fewer_than_three_oscillators_flatten_not_fail() {
        let mut bank = OscillatorBank::new();
        bank.replace_all(&[(2.0, 60.0, 0.0)]);
        // Head-on camera: only the X axis is driven, so with no pitch the
        // curve must stay on the horizontal center line.
        let view = ViewState {
            yaw: 0.0,
            pitch: 0.0,
            ..ViewState::default()
        };
        let points = render(bank.oscillators(), 2.0, VIEW, view);
        assert!(points.iter().all(|&(_, y)| (y - 60.0).abs() < 1e-3));
        assert!(points.iter().any(|&(x, _)| (x - 60.0).abs() > 5.0));
    }

    #[test]
    fn three_axes_fill_the_volume() {
        let mut bank = OscillatorBank::new();
        bank.replace_all(&[(2.0, 60.0, 0.0), (3.0, 60.0, 0.0), (5.0, 60.0, 90.0)]);
        let view = ViewState {
            yaw: 0.8,
            pitch: 0.6,
            ..ViewState::default()
        };
        let points = render(bank.oscillators(), 3.0, VIEW, view);

        let spread = |f: fn(&(f32, f32)) -> f32| {
            let lo = points.iter().map(f).fold(f32::INFINITY, f32::min);
            let hi = points.iter().map(f).fold(f32::NEG_INFINITY, f32::max);
            hi - lo
        };
        assert!(spread(|p| p.0) > 20.0, "curve too flat horizontally");
        assert!(spread(|p| p.1) > 20.0, "curve too flat vertically");
    }

    #[test]
    fn yaw_changes_the_projection() {
        let mut bank = OscillatorBank::new();
        bank.replace_all(&[(2.0, 60.0, 0.0), (3.0, 60.0, 0.0), (5.0, 60.0, 0.0)]);
        let a = render(
            bank.oscillators(),
            1.0,
            VIEW,
            ViewState {
                yaw: 0.0,
                ..ViewState::default()
            },
        );
        let b = render(
            bank.oscillators(),
            1.0,
            VIEW,
            ViewState {
                yaw: 1.0,
                ..ViewState::default()
            },
        );
        assert_ne!(a, b);
    }
}
