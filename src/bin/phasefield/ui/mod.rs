//! UI layout: one projection view plus a sidebar of oscillator parameters.

mod curve;
mod grid;
mod mesh;
mod sidebar;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame as TuiFrame,
};

use phasefield::render::{self, Frame, Viewport};

use super::app::App;

pub fn draw(frame: &mut TuiFrame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(frame.area());
    let view_area = chunks[0];

    // Interior of the bordered block; half-block cells double the vertical
    // resolution, braille curves quadruple both axes.
    let inner_w = view_area.width.saturating_sub(2).max(1) as usize;
    let inner_h = view_area.height.saturating_sub(2).max(1) as usize;

    let view = app.views.get(app.kind);
    let time = app.clock.time() as f32;
    let title = format!(" {} ", app.kind.label());

    let viewport = match resolution(app.kind) {
        Resolution::Braille => Viewport::new(inner_w * 2, inner_h * 4),
        Resolution::HalfBlock => Viewport::new(inner_w, inner_h * 2),
    };

    match render::render(app.kind, app.bank.oscillators(), time, viewport, view) {
        Frame::Curve(points) => {
            curve::render_curve(frame, view_area, &points, viewport, &title);
        }
        Frame::Field(pixels) => {
            grid::render_grid(frame, view_area, &pixels, &title);
        }
        Frame::Mesh(quads) => {
            let pixels = mesh::rasterize(&quads, viewport);
            grid::render_grid(frame, view_area, &pixels, &title);
        }
    }

    sidebar::render_sidebar(frame, chunks[1], app);
}

enum Resolution {
    Braille,
    HalfBlock,
}

fn resolution(kind: phasefield::render::RendererKind) -> Resolution {
    use phasefield::render::RendererKind::*;
    match kind {
        Time | Phase2d | Phase3d => Resolution::Braille,
        StandingField | RippleTank | FluidMesh => Resolution::HalfBlock,
    }
}
