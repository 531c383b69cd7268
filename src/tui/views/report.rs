//! Seven-day report view

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::display::report::{bar_cells, format_percentage};
use crate::reports::WeeklyReport;
use crate::tui::app::App;
use crate::tui::layout::ReportLayout;
use crate::tui::theme::Palette;

const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let screen = &app.report;

    let Some(data) = &screen.data else {
        let text = match (&screen.error, screen.loading) {
            (Some(error), _) => Span::styled(error.clone(), Style::default().fg(palette.error)),
            (None, true) => Span::styled("Loading report...", palette.dim()),
            (None, false) => Span::styled("No report", palette.dim()),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border(false))
            .title(Span::styled(" Last 7 days ", palette.title()));
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let layout = ReportLayout::new(area);
    let symbol = app.settings.currency_symbol.as_str();
    let report = &data.report;

    let mut summary = vec![Line::from(vec![
        Span::styled(
            format!(
                "{} to {}",
                report.start_date.format(&app.settings.date_format),
                report.end_date.format(&app.settings.date_format)
            ),
            palette.text(),
        ),
        Span::styled(
            format!(
                "   Total {}  ({} expenses)",
                report.total.format_with_symbol(symbol),
                report.count
            ),
            palette.title(),
        ),
        Span::styled(format!("   Source: {}", data.source), palette.dim()),
    ])];

    let status = if let Some(format) = screen.exporting {
        Span::styled(format!("Exporting {}...", format), palette.dim())
    } else if let Some(error) = &screen.error {
        Span::styled(error.clone(), Style::default().fg(palette.error))
    } else if let Some(path) = &screen.last_export {
        Span::styled(format!("Last export: {}", path.display()), palette.dim())
    } else {
        Span::raw("")
    };
    summary.push(Line::from(status));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(false))
        .title(Span::styled(" Last 7 days ", palette.title()));
    frame.render_widget(
        Paragraph::new(summary).block(block).style(palette.text()),
        layout.summary,
    );

    frame.render_widget(daily(report, symbol, palette), layout.daily);
    frame.render_widget(categories(report, symbol, palette), layout.categories);
}

fn bar(value: f64, max: f64, palette: &Palette) -> Vec<Span<'static>> {
    let filled = bar_cells(value, max, BAR_WIDTH);
    vec![
        Span::styled("█".repeat(filled), Style::default().fg(palette.accent)),
        Span::styled("░".repeat(BAR_WIDTH - filled), palette.dim()),
    ]
}

fn daily<'a>(report: &WeeklyReport, symbol: &str, palette: &Palette) -> Paragraph<'a> {
    let max = report.max_daily().as_f64();
    let lines: Vec<Line> = report
        .daily
        .iter()
        .map(|day| {
            let mut spans = vec![Span::styled(
                format!("{} ", day.date.format("%a %m-%d")),
                palette.text(),
            )];
            spans.extend(bar(day.total.as_f64(), max, palette));
            spans.push(Span::styled(
                format!(" {:>10}", day.total.format_with_symbol(symbol)),
                palette.text(),
            ));
            Line::from(spans)
        })
        .collect();

    Paragraph::new(lines).style(palette.text()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border(false))
            .title(Span::styled(" By day ", palette.title())),
    )
}

fn categories<'a>(report: &WeeklyReport, symbol: &str, palette: &Palette) -> Paragraph<'a> {
    let lines: Vec<Line> = if report.categories.is_empty() {
        vec![Line::styled("No spending in this period", palette.dim())]
    } else {
        report
            .categories
            .iter()
            .map(|c| {
                Line::styled(
                    format!(
                        "{:<9} {:>10} {:>6}  ({})",
                        c.category.label(),
                        c.total.format_with_symbol(symbol),
                        format_percentage(c.percentage),
                        c.count
                    ),
                    palette.text(),
                )
            })
            .collect()
    };

    Paragraph::new(lines).style(palette.text()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border(false))
            .title(Span::styled(" By category ", palette.title())),
    )
}
