//! Day list view
//!
//! One day's expenses, optionally split into sections by category or time of
//! day, each section with its subtotal.

use chrono::Local;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::display::report::truncate;
use crate::tui::app::App;
use crate::tui::layout::ListLayout;

const TITLE_WIDTH: usize = 28;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = ListLayout::new(area);
    render_header(frame, app, layout.header);
    render_rows(frame, app, layout.rows);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let settings = app.settings;
    let summary = app.list.summary();

    let status = if app.list.loading {
        "loading...".to_string()
    } else {
        format!(
            "{} expense{}  {}",
            summary.count,
            if summary.count == 1 { "" } else { "s" },
            summary.total.format_with_symbol(&settings.currency_symbol)
        )
    };

    let line = Line::from(vec![
        Span::styled(
            format!(
                "{} {}",
                summary.date.format("%a"),
                summary.date.format(&settings.date_format)
            ),
            palette.title(),
        ),
        Span::styled("   ", palette.text()),
        Span::styled(status, palette.text()),
        Span::styled(
            format!("   Grouping: {}", app.list.grouping.label()),
            palette.dim(),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(false));
    frame.render_widget(Paragraph::new(line).block(block).style(palette.text()), area);
}

fn render_rows(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let settings = app.settings;
    let symbol = settings.currency_symbol.as_str();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .title(Span::styled(" Expenses ", palette.title()));

    let sections = app.list.sections();
    if sections.is_empty() {
        let text = if app.list.loading {
            "Loading..."
        } else {
            "No expenses on this day. Press 'a' to add one."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, palette.dim())).block(block),
            area,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;
    let mut row = 0;

    for section in &sections {
        if let Some(title) = &section.title {
            if !lines.is_empty() {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(vec![
                Span::styled(format!("{:<40}", title), palette.title()),
                Span::styled(
                    format!("{:>12}", section.total.format_with_symbol(symbol)),
                    palette.title(),
                ),
            ]));
        }

        for expense in &section.expenses {
            let time = expense
                .datetime_in(&Local)
                .format(&settings.time_format)
                .to_string();
            let mut text = format!(
                " {:<6} {:<width$} {:<8} {:>10}",
                time,
                truncate(&expense.title, TITLE_WIDTH),
                expense.category.label(),
                expense.amount.format_with_symbol(symbol),
                width = TITLE_WIDTH
            );
            if expense.note.is_some() {
                text.push_str("  ✎");
            }
            if expense.receipt.is_some() {
                text.push_str("  ⎙");
            }

            let style = if row == app.selected_row {
                selected_line = lines.len();
                palette.selected()
            } else if app.list.deleting == Some(expense.id) {
                palette.dim().add_modifier(Modifier::CROSSED_OUT)
            } else {
                palette.text()
            };
            lines.push(Line::styled(text, style));
            row += 1;
        }
    }

    // Keep the selected row on screen
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (selected_line + 1).saturating_sub(visible) as u16;

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(palette.text())
            .scroll((scroll, 0)),
        area,
    );
}
