//! Status bar: key hints for the active tab or dialog

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, Dialog, Tab};

fn hints(app: &App) -> &'static str {
    match app.dialog {
        Dialog::Entry if app.entry.screen.awaiting_confirmation() => {
            "y:Save anyway  n:Back to form"
        }
        Dialog::Entry => "Tab/↓:Next  ⇧Tab/↑:Prev  ←/→:Category  Enter:Save  Esc:Cancel",
        Dialog::ConfirmDelete(_) => "y:Delete  n:Keep",
        Dialog::None => match app.tab {
            Tab::List => "a:Add  e:Edit  d:Delete  ←/→:Day  t:Today  g:Group  Tab:Next tab  q:Quit",
            Tab::Report => "r:Refresh  s:Sample/stored  c:CSV  p:PDF  Tab:Next tab  q:Quit",
            Tab::Settings => "↑/↓:Move  Enter:Apply  s:Sync  Tab:Next tab  q:Quit",
        },
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let mut spans = vec![Span::styled(format!(" {} ", hints(app)), palette.dim())];

    if let Some(error) = app.list.error.as_deref().filter(|_| app.tab == Tab::List) {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(error.to_string(), palette.text().fg(palette.error)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(palette.text()), area);
}
