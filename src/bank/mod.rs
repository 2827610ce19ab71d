//! The oscillator model: a bank of weighted, phased sinusoids.
//!
//! Every other part of the crate consumes this type read-only; the bank is
//! mutated only between ticks by whoever owns it. Parameters are normalized
//! at the write boundary (amplitude clamped, phase wrapped), so downstream
//! code never sees an out-of-range value.

pub mod presets;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound of the amplitude range. Amplitudes are percentages.
pub const AMP_MAX: f32 = 100.0;

/// One weighted sinusoid contributing to the composite signal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    /// Unique within a bank, stable across edits.
    pub id: u32,
    /// Cycles across the sample window. Never negative.
    pub frequency: f32,
    /// 0 to 100, clamped on write.
    pub amplitude: f32,
    /// Degrees, wrapped into [0, 360) on write.
    pub phase: f32,
    pub enabled: bool,
}

impl Oscillator {
    /// An oscillator contributes to the field only when audible and unmuted.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.enabled && self.amplitude > 0.0
    }

    #[inline]
    pub fn phase_radians(&self) -> f32 {
        self.phase.to_radians()
    }
}

/// Parameters for creating an oscillator. Normalized on insertion.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct OscParams {
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
}

impl OscParams {
    pub fn new(frequency: f32, amplitude: f32, phase: f32) -> Self {
        Self {
            frequency,
            amplitude,
            phase,
        }
    }
}

/// A partial update from a parameter widget. `None` fields are untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct OscUpdate {
    pub frequency: Option<f32>,
    pub amplitude: Option<f32>,
    pub phase: Option<f32>,
    pub enabled: Option<bool>,
}

/// An ordered bank of oscillators with value semantics.
///
/// Order matters to the phase-plane projections: the first active oscillator
/// drives one axis and the remainder are combined for the others.
#[derive(Debug, Clone, Default)]
pub struct OscillatorBank {
    oscillators: Vec<Oscillator>,
    next_id: u32,
}

impl OscillatorBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an oscillator and return its id.
    pub fn add(&mut self, params: OscParams) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.oscillators.push(Oscillator {
            id,
            frequency: normalize_frequency(params.frequency),
            amplitude: normalize_amplitude(params.amplitude),
            phase: normalize_phase(params.phase),
            enabled: true,
        });
        id
    }

    /// Apply a partial update. A missing id is ignored: edits are serialized
    /// by the caller, so last-write-wins is all that is needed.
    pub fn update(&mut self, id: u32, update: OscUpdate) {
        let Some(osc) = self.oscillators.iter_mut().find(|o| o.id == id) else {
            return;
        };
        if let Some(f) = update.frequency {
            osc.frequency = normalize_frequency(f);
        }
        if let Some(a) = update.amplitude {
            osc.amplitude = normalize_amplitude(a);
        }
        if let Some(p) = update.phase {
            osc.phase = normalize_phase(p);
        }
        if let Some(e) = update.enabled {
            osc.enabled = e;
        }
    }

    /// Remove an oscillator. A missing id is ignored.
    pub fn remove(&mut self, id: u32) {
        self.oscillators.retain(|o| o.id != id);
    }

    /// Replace the whole bank with literal (frequency, amplitude, phase)
    /// triples. Used by the preset loader.
    pub fn replace_all(&mut self, triples: &[(f32, f32, f32)]) {
        self.oscillators.clear();
        for &(frequency, amplitude, phase) in triples {
            self.add(OscParams::new(frequency, amplitude, phase));
        }
    }

    pub fn get(&self, id: u32) -> Option<&Oscillator> {
        self.oscillators.iter().find(|o| o.id == id)
    }

    /// All oscillators in insertion order.
    pub fn oscillators(&self) -> &[Oscillator] {
        &self.oscillators
    }

    /// Enabled, non-silent oscillators in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Oscillator> {
        self.oscillators.iter().filter(|o| o.is_active())
    }

    pub fn len(&self) -> usize {
        self.oscillators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oscillators.is_empty()
    }
}

#[inline]
fn normalize_frequency(f: f32) -> f32 {
    if f.is_finite() {
        f.max(0.0)
    } else {
        0.0
    }
}

#[inline]
fn normalize_amplitude(a: f32) -> f32 {
    if a.is_finite() {
        a.clamp(0.0, AMP_MAX)
    } else {
        0.0
    }
}

#[inline]
fn normalize_phase(p: f32) -> f32 {
    if p.is_finite() {
        p.rem_euclid(360.0)
    } else {
        0.0
    }
}
