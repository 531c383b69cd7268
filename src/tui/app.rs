//! Application state for the TUI
//!
//! `App` owns one state machine per screen. Key handlers turn input into
//! screen messages; whatever command a screen returns is run here against
//! the services and its result is fed back as another message.

use chrono::{Local, NaiveDate, Utc};

use crate::config::settings::Settings;
use crate::export::{ExportFormat, ExportService};
use crate::models::{Expense, ExpenseId};
use crate::screens::{
    EntryCommand, EntryField, EntryMsg, EntryScreen, ListCommand, ListMsg, ListScreen,
    ReportCommand, ReportMsg, ReportScreen, SettingsCommand, SettingsMsg, SettingsScreen,
};
use crate::services::{
    ExpenseService, ReportService, ReportSource, SyncService, ThemeService, ThemeSubscription,
};
use crate::storage::{ExpenseSubscription, Storage};

use super::theme::Palette;
use super::widgets::{Notification, NotificationQueue, TextInput};

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    List,
    Report,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Self::List, Self::Report, Self::Settings];

    pub fn title(&self) -> &'static str {
        match self {
            Self::List => "Expenses",
            Self::Report => "Report",
            Self::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Modal dialog on top of the tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    None,
    /// Expense entry form; shows the duplicate prompt while one is pending
    Entry,
    ConfirmDelete(ExpenseId),
}

/// Rows of the entry form, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Text(EntryField),
    Category,
}

pub const FORM_ROWS: [FormRow; 7] = [
    FormRow::Text(EntryField::Title),
    FormRow::Text(EntryField::Amount),
    FormRow::Category,
    FormRow::Text(EntryField::Date),
    FormRow::Text(EntryField::Time),
    FormRow::Text(EntryField::Note),
    FormRow::Text(EntryField::Receipt),
];

/// Entry form plus the cursor state of the focused text row
pub struct EntryDialog {
    pub screen: EntryScreen<Local>,
    pub focus: usize,
    pub input: TextInput,
}

impl EntryDialog {
    fn new() -> Self {
        let screen = EntryScreen::new(Local, Utc::now());
        let input = TextInput::new(screen.field(EntryField::Title));
        Self {
            screen,
            focus: 0,
            input,
        }
    }

    pub fn focused_row(&self) -> FormRow {
        FORM_ROWS[self.focus]
    }

    fn focus_row(&mut self, index: usize) {
        self.focus = index % FORM_ROWS.len();
        let content = match self.focused_row() {
            FormRow::Text(field) => self.screen.field(field).to_string(),
            FormRow::Category => String::new(),
        };
        self.input = TextInput::new(content);
    }

    pub fn focus_next(&mut self) {
        self.focus_row(self.focus + 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus_row(self.focus + FORM_ROWS.len() - 1);
    }

    /// Push the edited text of the focused row into the form
    pub fn commit_input(&mut self) {
        if let FormRow::Text(field) = self.focused_row() {
            if self.screen.field(field) != self.input.value() {
                self.screen
                    .update(EntryMsg::SetField(field, self.input.value().to_string()));
            }
        }
    }
}

/// Main application state
pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub should_quit: bool,
    pub tab: Tab,
    pub dialog: Dialog,
    pub palette: Palette,

    pub list: ListScreen<Local>,
    /// Index into `visible_rows()`
    pub selected_row: usize,
    pub report: ReportScreen,
    pub settings_screen: SettingsScreen,
    pub entry: EntryDialog,

    pub notifications: NotificationQueue,
    pub last_synced: Option<chrono::DateTime<Utc>>,

    day_watch: Option<(NaiveDate, ExpenseSubscription)>,
    theme_watch: Option<ThemeSubscription>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl<'a> App<'a> {
    /// Build the app and issue each screen's initial load
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        let (list, list_cmd) = ListScreen::new(today(), Local);
        let (report, report_cmd) =
            ReportScreen::new(ReportSource::from_flag(settings.report.use_sample_data));

        let mut app = Self {
            storage,
            settings,
            should_quit: false,
            tab: Tab::default(),
            dialog: Dialog::default(),
            palette: Palette::default(),
            list,
            selected_row: 0,
            report,
            settings_screen: SettingsScreen::default(),
            entry: EntryDialog::new(),
            notifications: NotificationQueue::new(),
            last_synced: SyncService::new(storage).last_synced_at().ok().flatten(),
            day_watch: None,
            theme_watch: None,
        };

        match ThemeService::new(storage).subscribe() {
            Ok(subscription) => app.theme_watch = Some(subscription),
            Err(e) => {
                tracing::warn!(error = %e, "theme subscription failed");
                app.notify(Notification::error(format!("Theme unavailable: {}", e)));
            }
        }

        app.run_list(list_cmd);
        app.run_report(report_cmd);
        app.poll_subscriptions();
        app
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog != Dialog::None
    }

    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::None;
    }

    /// Periodic housekeeping: pick up store changes and expire toasts
    pub fn tick(&mut self) {
        self.poll_subscriptions();
        self.notifications.remove_expired();
    }

    /// Deliver the newest emission of every live subscription
    pub fn poll_subscriptions(&mut self) {
        let loaded = self
            .day_watch
            .as_ref()
            .and_then(|(day, sub)| sub.latest().map(|expenses| (*day, expenses)));
        if let Some((day, expenses)) = loaded {
            self.list_msg(ListMsg::Loaded { day, expenses });
        }

        let theme = self.theme_watch.as_ref().and_then(|sub| sub.latest());
        if let Some(theme) = theme {
            self.palette = Palette::for_setting(theme);
            self.settings_msg(SettingsMsg::ThemeLoaded(theme));
        }
    }

    // Day list

    /// Expenses in display order (section by section)
    pub fn visible_rows(&self) -> Vec<Expense> {
        self.list
            .sections()
            .into_iter()
            .flat_map(|s| s.expenses)
            .collect()
    }

    pub fn selected_expense(&self) -> Option<Expense> {
        self.visible_rows().into_iter().nth(self.selected_row)
    }

    pub fn select_next_row(&mut self) {
        let count = self.visible_rows().len();
        if self.selected_row + 1 < count {
            self.selected_row += 1;
        }
    }

    pub fn select_prev_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_rows().len();
        self.selected_row = self.selected_row.min(count.saturating_sub(1));
    }

    pub fn go_to_today(&mut self) {
        self.list_msg(ListMsg::Today(today()));
    }

    pub fn list_msg(&mut self, msg: ListMsg) {
        let day_changed = matches!(
            msg,
            ListMsg::SelectDay(_) | ListMsg::PreviousDay | ListMsg::NextDay | ListMsg::Today(_)
        );
        let cmd = self.list.update(msg);
        if day_changed {
            self.selected_row = 0;
        }
        self.clamp_selection();
        if let Some(cmd) = cmd {
            self.run_list(cmd);
        }
    }

    fn run_list(&mut self, cmd: ListCommand) {
        match cmd {
            ListCommand::LoadDay(day) => {
                // Replacing the old subscription cancels it
                self.day_watch = None;
                match ExpenseService::new(self.storage).watch_day(day, &Local) {
                    Ok(sub) => {
                        self.day_watch = Some((day, sub));
                        self.poll_subscriptions();
                    }
                    Err(e) => self.list_msg(ListMsg::LoadFailed {
                        day,
                        error: e.to_string(),
                    }),
                }
            }
            ListCommand::Delete(id) => match ExpenseService::new(self.storage).delete(id) {
                Ok(removed) => {
                    self.list_msg(ListMsg::Deleted(id));
                    self.notify(Notification::success(format!("Deleted {}", removed.title)));
                    self.report_msg(ReportMsg::Refresh);
                }
                Err(e) => {
                    tracing::warn!(%id, error = %e, "delete failed");
                    self.list_msg(ListMsg::DeleteFailed(e.to_string()));
                }
            },
        }
    }

    /// Ask for confirmation before deleting the highlighted row
    pub fn request_delete_selected(&mut self) {
        if let Some(expense) = self.selected_expense() {
            self.dialog = Dialog::ConfirmDelete(expense.id);
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Dialog::ConfirmDelete(id) = self.dialog {
            self.close_dialog();
            self.list_msg(ListMsg::RequestDelete(id));
        }
    }

    // Entry dialog

    pub fn open_new_entry(&mut self) {
        self.entry.screen.update(EntryMsg::New { now: Utc::now() });
        self.entry.focus_row(0);
        self.dialog = Dialog::Entry;
    }

    pub fn open_edit_selected(&mut self) {
        if let Some(expense) = self.selected_expense() {
            self.entry.screen.update(EntryMsg::Edit(expense));
            self.entry.focus_row(0);
            self.dialog = Dialog::Entry;
        }
    }

    pub fn entry_msg(&mut self, msg: EntryMsg) {
        if let Some(cmd) = self.entry.screen.update(msg) {
            self.run_entry(cmd);
        }

        if let Some(saved) = self.entry.screen.saved.take() {
            self.notify(Notification::success(format!("Saved {}", saved.title)));
            self.close_dialog();
            self.report_msg(ReportMsg::Refresh);

            let day = saved.date_in(&Local);
            if day != self.list.selected_day {
                self.list_msg(ListMsg::SelectDay(day));
            }
        }
    }

    /// Submit the form with the focused row's pending text included
    pub fn submit_entry(&mut self) {
        self.entry.commit_input();
        self.entry_msg(EntryMsg::Submit);
    }

    fn run_entry(&mut self, cmd: EntryCommand) {
        match cmd {
            EntryCommand::Save { draft, policy } => {
                let msg = match ExpenseService::new(self.storage).save(draft, policy) {
                    Ok(outcome) => EntryMsg::SaveCompleted(outcome),
                    Err(e) => {
                        tracing::warn!(error = %e, "save failed");
                        EntryMsg::SaveFailed(e.to_string())
                    }
                };
                self.entry_msg(msg);
            }
        }
    }

    // Report

    pub fn report_msg(&mut self, msg: ReportMsg) {
        if let Some(cmd) = self.report.update(msg) {
            self.run_report(cmd);
        }
    }

    fn run_report(&mut self, cmd: ReportCommand) {
        match cmd {
            ReportCommand::Load(source) => {
                let msg = match ReportService::new(self.storage).weekly(source) {
                    Ok(data) => ReportMsg::Loaded(data),
                    Err(e) => ReportMsg::LoadFailed(e.to_string()),
                };
                self.report_msg(msg);
            }
            ReportCommand::Export(format) => {
                let msg = match self.export(format) {
                    Ok(path) => {
                        self.notify(Notification::success(format!(
                            "Exported {} to {}",
                            format,
                            path.display()
                        )));
                        ReportMsg::Exported(path)
                    }
                    Err(e) => {
                        self.notify(Notification::error(format!("Export failed: {}", e)));
                        ReportMsg::ExportFailed(e.to_string())
                    }
                };
                self.report_msg(msg);
            }
        }
    }

    fn export(&self, format: ExportFormat) -> anyhow::Result<std::path::PathBuf> {
        let data = self
            .report
            .data
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("No report loaded"))?;
        let service = ExportService::new(self.storage.paths(), &self.settings.currency_symbol);
        Ok(service.export(data, format, None)?)
    }

    // Settings

    pub fn settings_msg(&mut self, msg: SettingsMsg) {
        if let Some(cmd) = self.settings_screen.update(msg) {
            self.run_settings(cmd);
        }
    }

    fn run_settings(&mut self, cmd: SettingsCommand) {
        match cmd {
            SettingsCommand::SetTheme(theme) => {
                match ThemeService::new(self.storage).set(theme) {
                    // The theme subscription delivers the change
                    Ok(_) => self.poll_subscriptions(),
                    Err(e) => self.notify(Notification::error(format!("Theme not saved: {}", e))),
                }
            }
        }
    }

    pub fn sync(&mut self) {
        match SyncService::new(self.storage).sync() {
            Ok(report) => {
                self.last_synced = Some(report.synced_at);
                self.notify(Notification::info(format!(
                    "Synced {} expenses",
                    report.expense_count
                )));
            }
            Err(e) => self.notify(Notification::error(format!("Sync failed: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendlogPaths;
    use crate::models::{ExpenseCategory, ThemeSetting};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn fill_entry(app: &mut App, title: &str, amount: &str) {
        app.open_new_entry();
        app.entry
            .screen
            .update(EntryMsg::SetField(EntryField::Title, title.into()));
        app.entry
            .screen
            .update(EntryMsg::SetField(EntryField::Amount, amount.into()));
        app.entry
            .screen
            .update(EntryMsg::SetCategory(ExpenseCategory::Food));
        // Keep the focused row's buffer in step with the form
        app.entry.focus_row(0);
    }

    #[test]
    fn test_new_app_starts_on_today() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let app = App::new(&storage, &settings);

        assert_eq!(app.tab, Tab::List);
        assert_eq!(app.list.selected_day, today());
        assert!(!app.list.loading);
        assert!(app.report.data.is_some());
    }

    #[test]
    fn test_saved_entry_appears_in_list() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        fill_entry(&mut app, "Lunch", "12.50");
        app.submit_entry();
        assert_eq!(app.dialog, Dialog::None);
        assert_eq!(app.notifications.len(), 1);

        app.tick();
        let rows = app.visible_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Lunch");
        assert_eq!(app.report.data.as_ref().unwrap().report.count, 1);
    }

    #[test]
    fn test_invalid_entry_keeps_dialog_open() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        app.open_new_entry();
        app.submit_entry();

        assert_eq!(app.dialog, Dialog::Entry);
        assert!(app.entry.screen.errors.title.is_some());
        assert!(storage.expenses.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_needs_confirmation() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        fill_entry(&mut app, "Coffee", "3.20");
        app.submit_entry();
        fill_entry(&mut app, "Coffee", "3.20");
        app.submit_entry();

        assert_eq!(app.dialog, Dialog::Entry);
        assert!(app.entry.screen.awaiting_confirmation());
        assert_eq!(storage.expenses.get_all().unwrap().len(), 1);

        app.entry_msg(EntryMsg::ConfirmDuplicate);
        assert_eq!(app.dialog, Dialog::None);
        assert_eq!(storage.expenses.get_all().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_after_confirmation() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        fill_entry(&mut app, "Taxi", "18.00");
        app.submit_entry();
        app.tick();

        app.request_delete_selected();
        assert!(matches!(app.dialog, Dialog::ConfirmDelete(_)));
        app.confirm_delete();
        app.tick();

        assert!(app.visible_rows().is_empty());
        assert!(storage.expenses.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_theme_change_updates_palette() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);
        assert_eq!(app.palette, Palette::for_setting(ThemeSetting::System));

        app.settings_msg(SettingsMsg::Select(ThemeSetting::Dark));

        assert_eq!(app.settings_screen.theme, ThemeSetting::Dark);
        assert_eq!(app.palette, Palette::for_setting(ThemeSetting::Dark));
    }

    #[test]
    fn test_entry_focus_wraps() {
        let mut dialog = EntryDialog::new();
        dialog.focus_prev();
        assert_eq!(dialog.focused_row(), FormRow::Text(EntryField::Receipt));
        dialog.focus_next();
        assert_eq!(dialog.focused_row(), FormRow::Text(EntryField::Title));
        dialog.focus_next();
        dialog.focus_next();
        assert_eq!(dialog.focused_row(), FormRow::Category);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::List.next(), Tab::Report);
        assert_eq!(Tab::Settings.next(), Tab::List);
    }
}
