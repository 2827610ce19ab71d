//! Sidebar: oscillator table, clock readout, and key help.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use phasefield::render::Spin;

use super::super::app::App;

pub fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(7),
            Constraint::Length(10),
        ])
        .split(area);

    render_oscillators(frame, chunks[0], app);
    render_status(frame, chunks[1], app);
    render_help(frame, chunks[2]);
}

fn render_oscillators(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .bank
        .oscillators()
        .iter()
        .enumerate()
        .map(|(i, osc)| {
            let marker = if i == app.selected { ">" } else { " " };
            let state = if !osc.enabled {
                "muted"
            } else if osc.amplitude == 0.0 {
                "silent"
            } else {
                ""
            };
            let line = format!(
                "{marker} #{:<2} f={:<5.1} a={:<5.1} ph={:<5.1} {state}",
                osc.id, osc.frequency, osc.amplitude, osc.phase
            );
            let style = if i == app.selected {
                Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)
            } else if !osc.is_active() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Oscillators ")
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.views.get(app.kind);
    let spin = match view.spin {
        Spin::Auto => "auto",
        Spin::Manual => "manual",
    };
    let mut lines: Vec<Line> = vec![
        Line::from(format!("t = {:>8.2}s  x{:.2}", app.clock.time(), app.clock.speed())),
        Line::from(format!(
            "zoom {:.2}  pan ({:+.2}, {:+.2})",
            view.zoom, view.pan_x, view.pan_y
        )),
        Line::from(format!("spin {spin}  yaw {:.2}", view.yaw)),
    ];
    if !app.audio_status.is_empty() {
        lines.push(Line::from(Span::styled(
            app.audio_status.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let status =
        Paragraph::new(lines).block(Block::default().title(" Status ").borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = [
        "tab   switch projection",
        "p     cycle preset   a/x add/del",
        "↑/↓   select   ←/→ frequency",
        "-/=   amplitude   ,/. phase",
        "m     mute   space freeze   [/] speed",
        "hjkl  pan   i/o zoom",
        "d/f   yaw   c/v pitch   r auto-spin",
        "q     quit",
    ]
    .iter()
    .map(|s| Line::from(*s))
    .collect();

    let help = Paragraph::new(lines)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().title(" Keys ").borders(Borders::ALL));
    frame.render_widget(help, area);
}
