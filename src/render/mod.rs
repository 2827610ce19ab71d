//! Projection renderers: six independent strategies that turn the oscillator
//! bank plus a simulation time into a drawable buffer.
//!
//! Renderers are pure: all per-view state (zoom, pan, rotation) lives in a
//! [`ViewState`] owned by the host and passed in by value each tick, and no
//! renderer ever fails on degenerate input — an empty or silent bank yields
//! a flat line, a uniform quiet field, or a centered curve.

pub mod camera;
pub mod fluid;
pub mod phase2d;
pub mod phase3d;
pub mod ripple;
pub mod standing;
pub mod time;

use crate::bank::Oscillator;

/// Which projection is on screen. User-driven; no residual state crosses a
/// transition except the per-renderer [`ViewState`] kept in a [`ViewTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    Time,
    Phase2d,
    Phase3d,
    StandingField,
    RippleTank,
    FluidMesh,
}

impl RendererKind {
    pub const ALL: [RendererKind; 6] = [
        RendererKind::Time,
        RendererKind::Phase2d,
        RendererKind::Phase3d,
        RendererKind::StandingField,
        RendererKind::RippleTank,
        RendererKind::FluidMesh,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RendererKind::Time => "time trace",
            RendererKind::Phase2d => "phase plane",
            RendererKind::Phase3d => "phase volume",
            RendererKind::StandingField => "standing field",
            RendererKind::RippleTank => "ripple tank",
            RendererKind::FluidMesh => "fluid mesh",
        }
    }

    pub fn next(self) -> RendererKind {
        let i = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> RendererKind {
        let i = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or(0)
    }
}

/// Target buffer dimensions in logical pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Whether the 3-D projections rotate on their own or follow user drags.
/// Orthogonal to the angles themselves: entering `Manual` freezes auto
/// rotation at the current yaw until explicitly resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Auto,
    Manual,
}

/// Per-renderer pan/zoom/rotation, passed to the renderer by value.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
    /// Radians. Auto-advanced by the host while `spin` is [`Spin::Auto`].
    pub yaw: f32,
    pub pitch: f32,
    pub spin: Spin,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            yaw: 0.0,
            pitch: 0.55,
            spin: Spin::Auto,
        }
    }
}

/// One independently persisted [`ViewState`] per renderer.
#[derive(Debug, Clone, Default)]
pub struct ViewTable {
    states: [ViewState; 6],
}

impl ViewTable {
    pub fn get(&self, kind: RendererKind) -> ViewState {
        self.states[kind.index()]
    }

    pub fn get_mut(&mut self, kind: RendererKind) -> &mut ViewState {
        &mut self.states[kind.index()]
    }
}

/// 24-bit color for field cells and mesh quads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear blend from `self` toward `other`; `t` clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    /// Scale all channels; `f` clamped to [0, 1].
    pub fn scale(self, f: f32) -> Rgb {
        let f = if f.is_finite() { f.clamp(0.0, 1.0) } else { 0.0 };
        Rgb(
            (self.0 as f32 * f).round() as u8,
            (self.1 as f32 * f).round() as u8,
            (self.2 as f32 * f).round() as u8,
        )
    }
}

/// A dense row-major grid of colored cells.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<Rgb>,
}

impl PixelGrid {
    pub fn new(width: usize, height: usize, fill: Rgb) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        self.cells[y * self.width + x] = color;
    }

    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }
}

/// A projected quadrilateral, already in screen coordinates. Emitted in
/// painter's order: back quads first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [(f32, f32); 4],
    pub color: Rgb,
    /// 0 (invisible) to 1 (opaque).
    pub opacity: f32,
}

/// The drawable buffer a renderer hands to the host. Regenerated every tick,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// An ordered polyline in screen coordinates.
    Curve(Vec<(f32, f32)>),
    /// A dense colored grid.
    Field(PixelGrid),
    /// Painter-ordered filled quads.
    Mesh(Vec<Quad>),
}

/// Evaluate the selected projection for one tick.
pub fn render(
    kind: RendererKind,
    oscillators: &[Oscillator],
    time: f32,
    viewport: Viewport,
    view: ViewState,
) -> Frame {
    match kind {
        RendererKind::Time => Frame::Curve(time::render(oscillators, time, viewport)),
        RendererKind::Phase2d => Frame::Curve(phase2d::render(oscillators, time, viewport, view)),
        RendererKind::Phase3d => Frame::Curve(phase3d::render(oscillators, time, viewport, view)),
        RendererKind::StandingField => {
            Frame::Field(standing::render(oscillators, time, viewport, view))
        }
        RendererKind::RippleTank => Frame::Field(ripple::render(oscillators, time, viewport, view)),
        RendererKind::FluidMesh => Frame::Mesh(fluid::render(oscillators, time, viewport, view)),
    }
}
