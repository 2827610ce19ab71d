//! Field widget: paints a [`PixelGrid`] with half-block cells, packing two
//! grid rows into each terminal row (upper half = foreground, lower half =
//! background).

use ratatui::{
    layout::{Position, Rect},
    style::Color,
    widgets::{Block, Borders, Widget},
    Frame,
};

use phasefield::render::{PixelGrid, Rgb};

const HALF_BLOCK: &str = "\u{2580}"; // ▀

fn to_color(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

pub fn render_grid(frame: &mut Frame, area: Rect, grid: &PixelGrid, title: &str) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let cols = (inner.width as usize).min(grid.width());
    let rows = (inner.height as usize).min(grid.height() / 2);
    let buf = frame.buffer_mut();

    for row in 0..rows {
        for col in 0..cols {
            let upper = grid.get(col, row * 2);
            let lower = grid.get(col, row * 2 + 1);
            let pos = Position::new(inner.x + col as u16, inner.y + row as u16);
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_symbol(HALF_BLOCK)
                    .set_fg(to_color(upper))
                    .set_bg(to_color(lower));
            }
        }
    }
}
