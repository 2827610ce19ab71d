//! Named preset banks: ready-made (frequency, amplitude, phase) sets.

use super::OscillatorBank;

/// All presets in display order, for cycling from the UI.
pub const ALL: &[(&str, fn() -> OscillatorBank)] = &[
    ("harmonic series", harmonic_series),
    ("just major chord", just_major_chord),
    ("lissajous 3:2", lissajous_3_2),
    ("cancellation pair", cancellation_pair),
];

fn from_triples(triples: &[(f32, f32, f32)]) -> OscillatorBank {
    let mut bank = OscillatorBank::new();
    bank.replace_all(triples);
    bank
}

/// First six harmonics with 1/n amplitude falloff: a sawtooth-like stack.
pub fn harmonic_series() -> OscillatorBank {
    from_triples(&[
        (1.0, 100.0, 0.0),
        (2.0, 50.0, 0.0),
        (3.0, 33.0, 0.0),
        (4.0, 25.0, 0.0),
        (5.0, 20.0, 0.0),
        (6.0, 17.0, 0.0),
    ])
}

/// 4:5:6 just-intonation major triad.
pub fn just_major_chord() -> OscillatorBank {
    from_triples(&[(4.0, 60.0, 0.0), (5.0, 60.0, 0.0), (6.0, 60.0, 0.0)])
}

/// The classic 3:2 pair with a quarter-cycle offset; a closed figure on the
/// phase plane.
pub fn lissajous_3_2() -> OscillatorBank {
    from_triples(&[(3.0, 50.0, 0.0), (2.0, 50.0, 90.0)])
}

/// Equal and opposite: sums to silence on the time trace.
pub fn cancellation_pair() -> OscillatorBank {
    from_triples(&[(5.0, 50.0, 0.0), (5.0, 50.0, 180.0)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_nonempty_and_active() {
        for (name, build) in ALL {
            let bank = build();
            assert!(!bank.is_empty(), "preset {name} is empty");
            assert!(
                bank.active().count() > 0,
                "preset {name} has no active oscillators"
            );
        }
    }

    #[test]
    fn lissajous_preset_keeps_order() {
        let bank = lissajous_3_2();
        let freqs: Vec<f32> = bank.oscillators().iter().map(|o| o.frequency).collect();
        assert_eq!(freqs, vec![3.0, 2.0], "X-axis oscillator must come first");
    }
}
