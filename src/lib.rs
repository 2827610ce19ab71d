pub mod audio; // Tone mapping and continuous-tone generators
pub mod bank; // Oscillator model and presets
pub mod clock;
pub mod field; // Shared evaluators behind every projection
pub mod render; // Projection renderers and drawable buffers
pub mod spectral; // Direct Fourier analysis of sampled signals

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Ratio between an oscillator's visual frequency (cycles across the view)
/// and the audible tone it drives. Lifts the visually convenient 1-20 range
/// into an audible band while preserving frequency ratios between oscillators.
pub const FREQ_MULTIPLIER: f32 = 20.0;

pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
