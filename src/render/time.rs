//! Time-trace projection: the composite waveform sampled across the
//! horizontal axis, drifting leftward with simulation time.

use crate::bank::Oscillator;
use crate::field;

use super::Viewport;

/// Fraction of the viewport height given to a full-scale swing. The field
/// headroom scale admits values up to 1.2, so 0.4 keeps the trace inside
/// the viewport.
const VERTICAL_GAIN: f32 = 0.4;

/// Sample `time_value` once per horizontal pixel. An empty or silent bank
/// produces a flat center line.
pub fn render(oscillators: &[Oscillator], time: f32, viewport: Viewport) -> Vec<(f32, f32)> {
    let width = viewport.width.max(1);
    let mid = viewport.height as f32 * 0.5;
    let gain = viewport.height as f32 * VERTICAL_GAIN;

    (0..=width)
        .map(|x| {
            let t_sample = x as f32 / width as f32;
            let v = field::time_value(oscillators, time, t_sample);
            (x as f32, mid - v * gain)
        })
        .collect()
}
