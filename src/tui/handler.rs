//! Key handling for the TUI
//!
//! Routes each key press to the open dialog if there is one, otherwise to
//! the global bindings and then to the active tab.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::export::ExportFormat;
use crate::screens::{EntryMsg, ListMsg, ReportMsg, SettingsMsg};

use super::app::{App, Dialog, FormRow, Tab};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.dialog {
        Dialog::Entry => handle_entry_key(app, key),
        Dialog::ConfirmDelete(_) => handle_confirm_delete_key(app, key),
        Dialog::None => handle_normal_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return;
        }
        KeyCode::Tab => {
            app.switch_tab(app.tab.next());
            return;
        }
        KeyCode::Char('1') => return app.switch_tab(Tab::List),
        KeyCode::Char('2') => return app.switch_tab(Tab::Report),
        KeyCode::Char('3') => return app.switch_tab(Tab::Settings),
        _ => {}
    }

    match app.tab {
        Tab::List => handle_list_key(app, key),
        Tab::Report => handle_report_key(app, key),
        Tab::Settings => handle_settings_key(app, key),
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.list_msg(ListMsg::PreviousDay),
        KeyCode::Char('l') | KeyCode::Right => app.list_msg(ListMsg::NextDay),
        KeyCode::Char('t') => app.go_to_today(),
        KeyCode::Char('g') => app.list_msg(ListMsg::CycleGrouping),
        KeyCode::Char('j') | KeyCode::Down => app.select_next_row(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_row(),
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_new_entry(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete_selected(),
        KeyCode::Esc => app.list_msg(ListMsg::DismissError),
        _ => {}
    }
}

fn handle_report_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.report_msg(ReportMsg::Refresh),
        KeyCode::Char('s') => app.report_msg(ReportMsg::ToggleSource),
        KeyCode::Char('c') => app.report_msg(ReportMsg::Export(ExportFormat::Csv)),
        KeyCode::Char('p') => app.report_msg(ReportMsg::Export(ExportFormat::Pdf)),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.settings_msg(SettingsMsg::Next),
        KeyCode::Char('k') | KeyCode::Up => app.settings_msg(SettingsMsg::Previous),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let theme = app.settings_screen.highlighted;
            app.settings_msg(SettingsMsg::Select(theme));
        }
        KeyCode::Char('s') => app.sync(),
        _ => {}
    }
}

fn handle_confirm_delete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
        _ => {}
    }
}

fn handle_entry_key(app: &mut App, key: KeyEvent) {
    if app.entry.screen.awaiting_confirmation() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.entry_msg(EntryMsg::ConfirmDuplicate)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.entry_msg(EntryMsg::DismissDuplicate)
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return;
        }
        KeyCode::Enter => {
            app.submit_entry();
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.entry.commit_input();
            app.entry.focus_next();
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.entry.commit_input();
            app.entry.focus_prev();
            return;
        }
        _ => {}
    }

    match app.entry.focused_row() {
        FormRow::Category => match key.code {
            KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => {
                app.entry_msg(EntryMsg::NextCategory)
            }
            KeyCode::Left | KeyCode::Char('h') => app.entry_msg(EntryMsg::PrevCategory),
            _ => {}
        },
        FormRow::Text(_) => {
            let input = &mut app.entry.input;
            match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.insert(c)
                }
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.move_start(),
                KeyCode::End => input.move_end(),
                _ => return,
            }
            app.entry.commit_input();
        }
    }
}
