//! Audio parameter mapping: one continuous-tone generator per oscillator.
//!
//! The visual bank maps onto sound by ratio, not by absolute pitch: each
//! tone's target frequency is `frequency × FREQ_MULTIPLIER` and its target
//! gain is `amplitude / 100` (zero when muted). Both targets are approached
//! through a short exponential smoother instead of being set instantly, so
//! dragging a slider never clicks. Oscillator phase is deliberately not
//! mapped: a continuous-phase tone cannot be phase-stepped without a
//! discontinuity, so the audible and visual representations share ratios
//! but not phase alignment.

use crate::bank::{Oscillator, AMP_MAX};
use crate::{FREQ_MULTIPLIER, MIN_TIME};
use std::f32::consts::TAU;

/// Fixed headroom scale on the summed output, against constructive stacking.
const MASTER_HEADROOM: f32 = 0.5;
/// Exponential smoothing time constant for frequency and gain, seconds.
const SMOOTHING_TAU: f32 = 0.03;
/// Gain under which a released tone is dropped (about -80 dBFS).
const RELEASE_FLOOR: f32 = 1e-4;

/// Target parameters for one tone, derived from an oscillator snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParams {
    pub id: u32,
    /// Audible target frequency in Hz.
    pub frequency: f32,
    /// Target gain, 0 to 1.
    pub gain: f32,
}

impl ToneParams {
    pub fn from_oscillator(osc: &Oscillator) -> Self {
        Self {
            id: osc.id,
            frequency: osc.frequency * FREQ_MULTIPLIER,
            gain: if osc.is_active() {
                osc.amplitude / AMP_MAX
            } else {
                0.0
            },
        }
    }
}

/// One continuous-tone generator with its smoothing state. The smoother
/// lives here, per generator, not in any shared table.
#[derive(Debug, Clone)]
struct Tone {
    id: u32,
    target_frequency: f32,
    target_gain: f32,
    frequency: f32,
    gain: f32,
    /// Continuous phase accumulator in radians; never reset while alive.
    phase: f32,
    /// Set when the oscillator disappeared from the bank; the tone ramps to
    /// silence and is then dropped.
    releasing: bool,
}

impl Tone {
    fn new(params: ToneParams) -> Self {
        Self {
            id: params.id,
            target_frequency: params.frequency,
            target_gain: params.gain,
            // Start at the target frequency but at zero gain: the fade-in
            // masks the onset, and there is no stale pitch to glide from.
            frequency: params.frequency,
            gain: 0.0,
            phase: 0.0,
            releasing: false,
        }
    }
}

/// The id-keyed table of live tone generators.
///
/// `apply` is the diff pass: update matching tones, create new ones, mark
/// vanished ones releasing. `render_block` advances smoothing per sample and
/// mixes all tones into a mono buffer.
pub struct ToneBank {
    tones: Vec<Tone>,
    sample_rate: f32,
    /// Per-sample smoothing coefficient derived from `SMOOTHING_TAU`.
    alpha: f32,
}

impl ToneBank {
    pub fn new(sample_rate: f32) -> Self {
        let sample_rate = sample_rate.max(1.0);
        let alpha = 1.0 - (-1.0 / (SMOOTHING_TAU.max(MIN_TIME) * sample_rate)).exp();
        Self {
            tones: Vec::new(),
            sample_rate,
            alpha,
        }
    }

    /// Reconcile the generator table with a bank snapshot.
    pub fn apply(&mut self, params: &[ToneParams]) {
        for tone in &mut self.tones {
            match params.iter().find(|p| p.id == tone.id) {
                Some(p) => {
                    tone.target_frequency = p.frequency;
                    tone.target_gain = p.gain;
                    tone.releasing = false;
                }
                None => {
                    tone.target_gain = 0.0;
                    tone.releasing = true;
                }
            }
        }
        for p in params {
            if !self.tones.iter().any(|t| t.id == p.id) {
                self.tones.push(Tone::new(*p));
            }
        }
    }

    /// Stop everything: all tones ramp to silence and are dropped once
    /// inaudible. Used on teardown so no tone sticks.
    pub fn release_all(&mut self) {
        for tone in &mut self.tones {
            tone.target_gain = 0.0;
            tone.releasing = true;
        }
    }

    /// Render and mix all tones into `out` (mono).
    pub fn render_block(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        let alpha = self.alpha;
        let dt = 1.0 / self.sample_rate;

        for tone in &mut self.tones {
            for sample in out.iter_mut() {
                tone.frequency += (tone.target_frequency - tone.frequency) * alpha;
                tone.gain += (tone.target_gain - tone.gain) * alpha;
                tone.phase = (tone.phase + TAU * tone.frequency * dt) % TAU;
                *sample += tone.phase.sin() * tone.gain;
            }
        }
        for sample in out.iter_mut() {
            *sample *= MASTER_HEADROOM;
        }

        self.tones
            .retain(|t| !(t.releasing && t.gain < RELEASE_FLOOR));
    }

    pub fn active_tones(&self) -> usize {
        self.tones.len()
    }

    /// Current (smoothed frequency, smoothed gain) of a tone, for tests and
    /// status display.
    pub fn tone_state(&self, id: u32) -> Option<(f32, f32)> {
        self.tones
            .iter()
            .find(|t| t.id == id)
            .map(|t| (t.frequency, t.gain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{OscParams, OscillatorBank};

    const SAMPLE_RATE: f32 = 48_000.0;

    fn snapshot(bank: &OscillatorBank) -> Vec<ToneParams> {
        bank.oscillators()
            .iter()
            .map(ToneParams::from_oscillator)
            .collect()
    }

    #[test]
    fn oscillator_maps_to_scaled_frequency_and_unit_gain() {
        let mut bank = OscillatorBank::new();
        let id = bank.add(OscParams::new(10.0, 100.0, 0.0));
        let params = ToneParams::from_oscillator(bank.get(id).unwrap());
        assert_eq!(params.frequency, 200.0);
        assert_eq!(params.gain, 1.0);
    }

    #[test]
    fn muted_oscillator_targets_zero_gain_at_its_frequency() {
        let osc = Oscillator {
            id: 7,
            frequency: 5.0,
            amplitude: 80.0,
            phase: 0.0,
            enabled: false,
        };
        let params = ToneParams::from_oscillator(&osc);
        assert_eq!(params.gain, 0.0);
        assert_eq!(params.frequency, 100.0);
    }

    #[test]
    fn gain_approaches_target_asymptotically() {
        let mut tones = ToneBank::new(SAMPLE_RATE);
        tones.apply(&[ToneParams {
            id: 0,
            frequency: 200.0,
            gain: 1.0,
        }]);

        let mut block = vec![0.0f32; 256];
        tones.render_block(&mut block);
        let (_, gain_early) = tones.tone_state(0).unwrap();
        assert!(
            gain_early > 0.0 && gain_early < 1.0,
            "gain must ramp, not jump: {gain_early}"
        );

        // ~0.5 s of audio: many time constants later the target is reached.
        for _ in 0..100 {
            tones.render_block(&mut block);
        }
        let (freq, gain) = tones.tone_state(0).unwrap();
        assert!((gain - 1.0).abs() < 1e-3, "gain settled at {gain}");
        assert!((freq - 200.0).abs() < 1e-2, "frequency settled at {freq}");
    }

    #[test]
    fn vanished_oscillator_ramps_out_and_is_dropped() {
        let mut tones = ToneBank::new(SAMPLE_RATE);
        tones.apply(&[ToneParams {
            id: 3,
            frequency: 100.0,
            gain: 0.8,
        }]);
        let mut block = vec![0.0f32; 512];
        for _ in 0..20 {
            tones.render_block(&mut block);
        }
        assert_eq!(tones.active_tones(), 1);

        // Oscillator removed from the bank: diff pass marks it releasing.
        tones.apply(&[]);
        assert_eq!(tones.active_tones(), 1, "release is a ramp, not a cut");
        for _ in 0..100 {
            tones.render_block(&mut block);
        }
        assert_eq!(tones.active_tones(), 0, "released tone must be dropped");
    }

    #[test]
    fn new_tone_starts_silent() {
        let mut tones = ToneBank::new(SAMPLE_RATE);
        tones.apply(&[ToneParams {
            id: 1,
            frequency: 440.0,
            gain: 1.0,
        }]);
        let (_, gain) = tones.tone_state(1).unwrap();
        assert_eq!(gain, 0.0);
    }

    #[test]
    fn output_respects_master_headroom() {
        let mut tones = ToneBank::new(SAMPLE_RATE);
        let mut bank = OscillatorBank::new();
        for f in [2.0, 3.0, 5.0, 7.0] {
            bank.add(OscParams::new(f, 100.0, 0.0));
        }
        tones.apply(&snapshot(&bank));

        let mut block = vec![0.0f32; 1024];
        let mut peak = 0.0f32;
        for _ in 0..50 {
            tones.render_block(&mut block);
            for &s in &block {
                peak = peak.max(s.abs());
            }
        }
        assert!(
            peak <= 4.0 * MASTER_HEADROOM + 1e-3,
            "headroom scaling missing, peak = {peak}"
        );
        assert!(peak > 0.1, "tones should be audible");
    }

    #[test]
    fn release_all_leaves_no_stuck_tones() {
        let mut tones = ToneBank::new(SAMPLE_RATE);
        tones.apply(&[
            ToneParams {
                id: 0,
                frequency: 100.0,
                gain: 0.9,
            },
            ToneParams {
                id: 1,
                frequency: 150.0,
                gain: 0.9,
            },
        ]);
        let mut block = vec![0.0f32; 512];
        for _ in 0..20 {
            tones.render_block(&mut block);
        }

        tones.release_all();
        for _ in 0..120 {
            tones.render_block(&mut block);
        }
        assert_eq!(tones.active_tones(), 0);
        tones.render_block(&mut block);
        assert!(block.iter().all(|&s| s == 0.0), "teardown must end in silence");
    }

    #[test]
    fn reapplying_same_params_is_stable() {
        let mut tones = ToneBank::new(SAMPLE_RATE);
        let params = [ToneParams {
            id: 9,
            frequency: 300.0,
            gain: 0.5,
        }];
        tones.apply(&params);
        let mut block = vec![0.0f32; 256];
        for _ in 0..10 {
            tones.apply(&params);
            tones.render_block(&mut block);
        }
        assert_eq!(tones.active_tones(), 1);
    }
}
