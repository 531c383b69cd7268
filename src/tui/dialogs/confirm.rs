//! Confirmation dialogs
//!
//! Delete confirmation and the possible-duplicate prompt shown over the
//! entry form.

use chrono::Local;
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::display::report::truncate;
use crate::models::ExpenseId;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

fn buttons<'a>(app: &App, yes: &'a str, no: &'a str) -> Line<'a> {
    let palette = &app.palette;
    Line::from(vec![
        Span::styled("[Y]", Style::default().fg(palette.positive)),
        Span::raw(format!(" {}  ", yes)),
        Span::styled("[N]", Style::default().fg(palette.error)),
        Span::raw(format!(" {}", no)),
    ])
}

fn frame_block(app: &App, title: &str) -> Block<'static> {
    let palette = &app.palette;
    Block::default()
        .title(Span::styled(format!(" {} ", title), palette.title().fg(palette.warning)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.warning))
        .style(palette.text())
}

pub fn render_delete(frame: &mut Frame, app: &App, id: ExpenseId) {
    let area = centered_rect_fixed(50, 7, frame.area());
    frame.render_widget(Clear, area);

    let what = app
        .list
        .expenses
        .iter()
        .find(|e| e.id == id)
        .map(|e| {
            format!(
                "{} ({})",
                truncate(&e.title, 24),
                e.amount.format_with_symbol(&app.settings.currency_symbol)
            )
        })
        .unwrap_or_else(|| format!("expense {}", id));

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("Delete {}?", what)),
        Line::raw(""),
        buttons(app, "Delete", "Keep"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(frame_block(app, "Delete expense"))
            .wrap(Wrap { trim: false }),
        area,
    );
}

pub fn render_duplicates(frame: &mut Frame, app: &App) {
    let duplicates = &app.entry.screen.duplicates;
    let shown = duplicates.len().min(5);
    let height = shown as u16 + 7;
    let area = centered_rect_fixed(56, height, frame.area());
    frame.render_widget(Clear, area);

    let symbol = app.settings.currency_symbol.as_str();
    let mut lines = vec![Line::raw(
        "An expense with this title and amount already exists today:",
    )];
    lines.push(Line::raw(""));
    for expense in duplicates.iter().take(shown) {
        lines.push(Line::styled(
            format!(
                "  {}  {}  {}",
                expense
                    .datetime_in(&Local)
                    .format(&app.settings.time_format),
                truncate(&expense.title, 28),
                expense.amount.format_with_symbol(symbol)
            ),
            app.palette.dim(),
        ));
    }
    lines.push(Line::raw(""));
    lines.push(buttons(app, "Save anyway", "Back to form"));

    frame.render_widget(
        Paragraph::new(lines)
            .block(frame_block(app, "Possible duplicate"))
            .wrap(Wrap { trim: false }),
        area,
    );
}
