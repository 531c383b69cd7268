//! TUI views
//!
//! Pure rendering of `App` state: tab bar, the active tab, the status bar,
//! then any open dialog and the oldest pending toast on top.

pub mod list;
pub mod report;
pub mod settings;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{App, Dialog, Tab};
use super::dialogs;
use super::layout::{toast_rect, AppLayout};
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(app.palette.text()), area);

    let layout = AppLayout::new(area);
    render_tabs(frame, app, layout.tabs);

    match app.tab {
        Tab::List => list::render(frame, app, layout.main),
        Tab::Report => report::render(frame, app, layout.main),
        Tab::Settings => settings::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    match app.dialog {
        Dialog::Entry if app.entry.screen.awaiting_confirmation() => {
            dialogs::entry::render(frame, app);
            dialogs::confirm::render_duplicates(frame, app);
        }
        Dialog::Entry => dialogs::entry::render(frame, app),
        Dialog::ConfirmDelete(id) => dialogs::confirm::render_delete(frame, app, id),
        Dialog::None => {}
    }

    if let Some(notification) = app.notifications.current() {
        let rect = toast_rect(44, 4, area);
        frame.render_widget(NotificationWidget::new(notification, &app.palette), rect);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            Line::from(vec![
                Span::styled(format!("{} ", i + 1), palette.dim()),
                Span::raw(tab.title()),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border(false))
                .title(Span::styled(" spendlog ", palette.title())),
        )
        .style(palette.text())
        .highlight_style(palette.selected())
        .divider(Span::styled("│", Style::default().fg(palette.muted)));

    frame.render_widget(tabs, area);
}
