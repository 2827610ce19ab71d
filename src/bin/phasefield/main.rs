//! phasefield - terminal front end for the oscillator field engine
//!
//! Run with: cargo run

mod app;
mod ui;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let terminal = ratatui::init();

    let res = app::run(terminal);

    ratatui::restore();
    res
}
