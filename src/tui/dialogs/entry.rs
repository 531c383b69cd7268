//! Expense entry dialog
//!
//! Renders the entry form with per-field error messages under each row.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};

use crate::models::ExpenseCategory;
use crate::screens::EntryField;
use crate::tui::app::{App, FormRow, FORM_ROWS};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::{InputField, LABEL_WIDTH};

const WIDTH: u16 = 64;

fn label(row: FormRow) -> &'static str {
    match row {
        FormRow::Text(EntryField::Title) => "Title",
        FormRow::Text(EntryField::Amount) => "Amount",
        FormRow::Category => "Category",
        FormRow::Text(EntryField::Date) => "Date",
        FormRow::Text(EntryField::Time) => "Time",
        FormRow::Text(EntryField::Note) => "Note",
        FormRow::Text(EntryField::Receipt) => "Receipt",
    }
}

fn placeholder(field: EntryField) -> &'static str {
    match field {
        EntryField::Title => "e.g. Team lunch",
        EntryField::Amount => "e.g. 12.50",
        EntryField::Date => "YYYY-MM-DD",
        EntryField::Time => "HH:MM",
        EntryField::Note => "optional, up to 100 characters",
        EntryField::Receipt => "optional path to a receipt image",
    }
}

/// Error shown under a row, if any
fn row_error<'a>(app: &'a App<'_>, row: FormRow) -> Option<&'a str> {
    let screen = &app.entry.screen;
    match row {
        FormRow::Text(EntryField::Title) => screen.errors.title.as_deref(),
        FormRow::Text(EntryField::Amount) => screen.errors.amount.as_deref(),
        FormRow::Category => screen.errors.category.as_deref(),
        FormRow::Text(EntryField::Note) => screen.errors.note.as_deref(),
        FormRow::Text(EntryField::Time) => screen.when_error.as_deref(),
        FormRow::Text(_) => None,
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let palette = &app.palette;
    let screen = &app.entry.screen;

    let error_rows = FORM_ROWS
        .iter()
        .filter(|row| row_error(app, **row).is_some())
        .count() as u16;
    let footer_rows = u16::from(screen.failure.is_some()) + 2;
    let height = FORM_ROWS.len() as u16 + error_rows + footer_rows + 3;
    let area = centered_rect_fixed(WIDTH, height, frame.area());

    frame.render_widget(Clear, area);

    let title = if screen.is_edit() {
        format!(" Edit expense {} ", screen.editing)
    } else {
        " New expense ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .title(Span::styled(title, palette.title()))
        .style(palette.text());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buf = frame.buffer_mut();
    let mut y = inner.y + 1;
    let bottom = inner.y + inner.height;

    for (index, row) in FORM_ROWS.iter().enumerate() {
        if y >= bottom {
            break;
        }
        let line = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1);
        let focused = index == app.entry.focus;

        match row {
            FormRow::Text(field) => {
                let mut input = InputField::new(label(*row), screen.field(*field), palette)
                    .placeholder(placeholder(*field));
                if focused {
                    input = input.editing(&app.entry.input);
                }
                input.render(line, buf);
            }
            FormRow::Category => {
                let mut spans = vec![Span::styled(
                    format!("{:<width$}", "Category:", width = LABEL_WIDTH as usize),
                    if focused {
                        palette.title()
                    } else {
                        Style::default().fg(palette.accent)
                    },
                )];
                for category in ExpenseCategory::SELECTABLE {
                    let style = if screen.category == Some(category) {
                        palette.selected()
                    } else {
                        palette.dim()
                    };
                    spans.push(Span::styled(format!(" {} ", category.label()), style));
                    spans.push(Span::raw(" "));
                }
                buf.set_line(line.x, line.y, &Line::from(spans), line.width);
            }
        }
        y += 1;

        if let Some(error) = row_error(app, *row) {
            if y < bottom {
                let message = Span::styled(
                    format!("{:>width$}{}", "", error, width = LABEL_WIDTH as usize),
                    Style::default().fg(palette.error),
                );
                buf.set_span(line.x, y, &message, line.width);
                y += 1;
            }
        }
    }

    if let Some(failure) = &screen.failure {
        y += 1;
        if y < bottom {
            let message = Span::styled(
                format!("Could not save: {}", failure),
                Style::default().fg(palette.error),
            );
            buf.set_span(inner.x + 1, y, &message, inner.width.saturating_sub(2));
        }
    }

    let status = if screen.saving {
        "Saving..."
    } else {
        "Enter to save, Esc to cancel"
    };
    let footer = Paragraph::new(Span::styled(status, palette.dim()));
    if inner.height > 0 {
        let footer_area = Rect::new(inner.x + 1, bottom - 1, inner.width.saturating_sub(2), 1);
        footer.render(footer_area, buf);
    }
}
