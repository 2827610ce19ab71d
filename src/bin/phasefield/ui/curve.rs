//! Polyline widget: draws curve frames on a braille canvas.

use ratatui::{
    layout::Rect,
    style::Color,
    symbols,
    widgets::{
        canvas::{Canvas, Line},
        Block, Borders,
    },
    Frame,
};

use phasefield::render::Viewport;

pub fn render_curve(
    frame: &mut Frame,
    area: Rect,
    points: &[(f32, f32)],
    viewport: Viewport,
    title: &str,
) {
    let h = viewport.height as f64;
    let canvas = Canvas::default()
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, viewport.width as f64])
        .y_bounds([0.0, h])
        .paint(|ctx| {
            for pair in points.windows(2) {
                let (x1, y1) = pair[0];
                let (x2, y2) = pair[1];
                // Renderer coordinates grow downward, canvas upward.
                ctx.draw(&Line {
                    x1: x1 as f64,
                    y1: h - y1 as f64,
                    x2: x2 as f64,
                    y2: h - y2 as f64,
                    color: Color::Cyan,
                });
            }
        });

    frame.render_widget(canvas, area);
}
