//! Application state and event loop: owns the bank, the clock, and the
//! per-renderer view table; pushes bank snapshots to the audio thread.

use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use rtrb::RingBuffer;

use phasefield::audio::{ToneBank, ToneParams};
use phasefield::bank::{presets, OscParams, OscUpdate, OscillatorBank};
use phasefield::clock::SimulationClock;
use phasefield::render::{RendererKind, Spin, ViewTable};
use phasefield::MAX_BLOCK_SIZE;

use super::ui;

/// Auto-rotation rate for the 3-D projections, radians per real second.
const AUTO_YAW_RATE: f32 = 0.35;
/// Capacity of the snapshot ring; latest snapshot wins on the audio side.
const SNAPSHOT_RING: usize = 32;

pub struct App {
    pub bank: OscillatorBank,
    pub clock: SimulationClock,
    pub views: ViewTable,
    pub kind: RendererKind,
    /// Index into `bank.oscillators()` selected for parameter edits.
    pub selected: usize,
    pub preset_index: usize,
    /// One-time capability notice when the audio device is unavailable.
    pub audio_status: String,
}

impl App {
    fn new() -> Self {
        let mut app = Self {
            bank: presets::harmonic_series(),
            clock: SimulationClock::new(),
            views: ViewTable::default(),
            kind: RendererKind::Time,
            selected: 0,
            preset_index: 0,
            audio_status: String::new(),
        };
        app.clamp_selection();
        app
    }

    fn clamp_selection(&mut self) {
        if self.bank.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.bank.len() - 1);
        }
    }

    fn selected_id(&self) -> Option<u32> {
        self.bank.oscillators().get(self.selected).map(|o| o.id)
    }

    fn update_selected(&mut self, update: OscUpdate) {
        if let Some(id) = self.selected_id() {
            self.bank.update(id, update);
        }
    }

    fn snapshot(&self) -> Vec<ToneParams> {
        self.bank
            .oscillators()
            .iter()
            .map(ToneParams::from_oscillator)
            .collect()
    }
}

pub fn run(mut terminal: DefaultTerminal) -> EyreResult<()> {
    let mut app = App::new();

    // Audio is a capability, not a requirement: on failure note it once and
    // keep the visual path running.
    let (mut tone_tx, _stream) = match start_audio() {
        Ok((tx, stream)) => (Some(tx), Some(stream)),
        Err(err) => {
            app.audio_status = format!("audio unavailable: {err}");
            (None, None)
        }
    };

    let mut last_tick = Instant::now();
    let mut paused_speed = 1.0f64;

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;
        app.clock.advance(dt);

        // Auto-rotation advances on real time so it keeps moving while the
        // simulation is frozen.
        for kind in [RendererKind::Phase3d, RendererKind::FluidMesh] {
            let view = app.views.get_mut(kind);
            if view.spin == Spin::Auto {
                view.yaw = (view.yaw + dt as f32 * AUTO_YAW_RATE) % std::f32::consts::TAU;
            }
        }

        // Latest bank snapshot to the audio thread; dropped when full.
        if let Some(tx) = tone_tx.as_mut() {
            let _ = tx.push(app.snapshot());
        }

        terminal.draw(|frame| ui::draw(frame, &app))?;

        if !event::poll(Duration::from_millis(16))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Tab => app.kind = app.kind.next(),
            KeyCode::BackTab => app.kind = app.kind.prev(),

            // Simulation speed
            KeyCode::Char(' ') => {
                if app.clock.speed() > 0.0 {
                    paused_speed = app.clock.speed();
                    app.clock.set_speed(0.0);
                } else {
                    app.clock.set_speed(paused_speed);
                }
            }
            KeyCode::Char('[') => app.clock.set_speed(app.clock.speed() * 0.8),
            KeyCode::Char(']') => {
                let s = (app.clock.speed() * 1.25).max(0.05);
                app.clock.set_speed(s);
            }

            // Bank edits
            KeyCode::Char('p') => {
                app.preset_index = (app.preset_index + 1) % presets::ALL.len();
                app.bank = presets::ALL[app.preset_index].1();
                app.clamp_selection();
            }
            KeyCode::Char('a') => {
                let freq = app.bank.len() as f32 + 1.0;
                app.bank.add(OscParams::new(freq, 50.0, 0.0));
                app.selected = app.bank.len() - 1;
            }
            KeyCode::Char('x') => {
                if let Some(id) = app.selected_id() {
                    app.bank.remove(id);
                    app.clamp_selection();
                }
            }
            KeyCode::Up => {
                app.selected = app.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                app.selected += 1;
                app.clamp_selection();
            }
            KeyCode::Left => nudge(&mut app, |o| OscUpdate {
                frequency: Some(o.0 - 0.5),
                ..Default::default()
            }),
            KeyCode::Right => nudge(&mut app, |o| OscUpdate {
                frequency: Some(o.0 + 0.5),
                ..Default::default()
            }),
            KeyCode::Char('-') => nudge(&mut app, |o| OscUpdate {
                amplitude: Some(o.1 - 5.0),
                ..Default::default()
            }),
            KeyCode::Char('=') | KeyCode::Char('+') => nudge(&mut app, |o| OscUpdate {
                amplitude: Some(o.1 + 5.0),
                ..Default::default()
            }),
            KeyCode::Char(',') => nudge(&mut app, |o| OscUpdate {
                phase: Some(o.2 - 15.0),
                ..Default::default()
            }),
            KeyCode::Char('.') => nudge(&mut app, |o| OscUpdate {
                phase: Some(o.2 + 15.0),
                ..Default::default()
            }),
            KeyCode::Char('m') => {
                if let Some(id) = app.selected_id() {
                    let enabled = app.bank.get(id).map(|o| o.enabled).unwrap_or(true);
                    app.bank.update(
                        id,
                        OscUpdate {
                            enabled: Some(!enabled),
                            ..Default::default()
                        },
                    );
                }
            }

            // View controls for the active renderer
            KeyCode::Char('h') => app.views.get_mut(app.kind).pan_x -= 0.05,
            KeyCode::Char('l') => app.views.get_mut(app.kind).pan_x += 0.05,
            KeyCode::Char('k') => app.views.get_mut(app.kind).pan_y -= 0.05,
            KeyCode::Char('j') => app.views.get_mut(app.kind).pan_y += 0.05,
            KeyCode::Char('i') => {
                let view = app.views.get_mut(app.kind);
                view.zoom = (view.zoom * 1.2).min(40.0);
            }
            KeyCode::Char('o') => {
                let view = app.views.get_mut(app.kind);
                view.zoom = (view.zoom / 1.2).max(0.05);
            }

            // Manual rotation pauses auto-spin until explicitly resumed.
            KeyCode::Char('d') => drag_yaw(&mut app, -0.1),
            KeyCode::Char('f') => drag_yaw(&mut app, 0.1),
            KeyCode::Char('c') => drag_pitch(&mut app, -0.05),
            KeyCode::Char('v') => drag_pitch(&mut app, 0.05),
            KeyCode::Char('r') => app.views.get_mut(app.kind).spin = Spin::Auto,

            _ => {}
        }
    }

    Ok(())
}

/// Apply a partial update derived from the selected oscillator's current
/// (frequency, amplitude, phase).
fn nudge(app: &mut App, f: impl Fn((f32, f32, f32)) -> OscUpdate) {
    let Some(id) = app.selected_id() else { return };
    let Some(osc) = app.bank.get(id) else { return };
    let update = f((osc.frequency, osc.amplitude, osc.phase));
    app.bank.update(id, update);
}

fn drag_yaw(app: &mut App, delta: f32) {
    let view = app.views.get_mut(app.kind);
    view.spin = Spin::Manual;
    view.yaw += delta;
}

fn drag_pitch(app: &mut App, delta: f32) {
    let view = app.views.get_mut(app.kind);
    view.spin = Spin::Manual;
    view.pitch = (view.pitch + delta).clamp(-1.4, 1.4);
}

/// Build the output stream: a [`ToneBank`] fed by bank snapshots over an
/// rtrb ring, rendered block-wise and duplicated across channels.
fn start_audio() -> EyreResult<(rtrb::Producer<Vec<ToneParams>>, cpal::Stream)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let (tx, mut rx) = RingBuffer::<Vec<ToneParams>>::new(SNAPSHOT_RING);
    let mut tones = ToneBank::new(sample_rate);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                // Drain pending snapshots, keeping only the latest.
                let mut latest = None;
                while let Ok(snapshot) = rx.pop() {
                    latest = Some(snapshot);
                }
                if let Some(snapshot) = latest {
                    tones.apply(&snapshot);
                }

                let total_frames = data.len() / channels;
                let mut frames_written = 0;
                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    tones.render_block(block);

                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }
                    frames_written += frames_to_render;
                }
            },
            |err| eprintln!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;
    Ok((tx, stream))
}
