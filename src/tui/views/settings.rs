//! Settings view: theme picker and sync status

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::ThemeSetting;
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let screen = &app.settings_screen;
    let themes: Vec<Line> = ThemeSetting::ALL
        .iter()
        .map(|theme| {
            let marker = if *theme == screen.theme { "●" } else { "○" };
            let style = if *theme == screen.highlighted {
                palette.selected()
            } else {
                palette.text()
            };
            Line::styled(format!(" {} {}", marker, theme.label()), style)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(themes).style(palette.text()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border(true))
                .title(Span::styled(" Theme ", palette.title())),
        ),
        chunks[0],
    );

    let synced = match app.last_synced {
        Some(at) => at
            .with_timezone(&Local)
            .format(&format!(
                "{} {}",
                app.settings.date_format, app.settings.time_format
            ))
            .to_string(),
        None => "never".to_string(),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("Last sync: ", palette.dim()),
            Span::styled(synced, palette.text()),
        ]),
        Line::from(vec![
            Span::styled("Data:      ", palette.dim()),
            Span::styled(
                app.storage.paths().base_dir().display().to_string(),
                palette.text(),
            ),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).style(palette.text()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border(false))
                .title(Span::styled(" Sync ", palette.title())),
        ),
        chunks[1],
    );
}
