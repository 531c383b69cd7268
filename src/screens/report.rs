//! Weekly report screen

use std::path::PathBuf;

use crate::export::ExportFormat;
use crate::services::{ReportData, ReportSource};

#[derive(Debug, Clone, PartialEq)]
pub enum ReportMsg {
    Refresh,
    /// Switch between stored and sample data
    ToggleSource,
    Loaded(ReportData),
    LoadFailed(String),
    Export(ExportFormat),
    Exported(PathBuf),
    ExportFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCommand {
    Load(ReportSource),
    Export(ExportFormat),
}

#[derive(Debug, Clone, Default)]
pub struct ReportScreen {
    pub source: ReportSource,
    pub data: Option<ReportData>,
    pub loading: bool,
    pub exporting: Option<ExportFormat>,
    pub last_export: Option<PathBuf>,
    pub error: Option<String>,
}

impl ReportScreen {
    pub fn new(source: ReportSource) -> (Self, ReportCommand) {
        let screen = Self {
            source,
            loading: true,
            ..Default::default()
        };
        (screen, ReportCommand::Load(source))
    }

    pub fn update(&mut self, msg: ReportMsg) -> Option<ReportCommand> {
        match msg {
            ReportMsg::Refresh => self.load(),
            ReportMsg::ToggleSource => {
                self.source = match self.source {
                    ReportSource::Stored => ReportSource::Sample,
                    ReportSource::Sample => ReportSource::Stored,
                };
                self.loading = false;
                self.load()
            }
            ReportMsg::Loaded(data) => {
                if data.source == self.source {
                    self.data = Some(data);
                    self.loading = false;
                    self.error = None;
                }
                None
            }
            ReportMsg::LoadFailed(error) => {
                self.loading = false;
                self.error = Some(error);
                None
            }
            ReportMsg::Export(format) => {
                if self.exporting.is_some() || self.data.is_none() {
                    return None;
                }
                self.exporting = Some(format);
                self.error = None;
                Some(ReportCommand::Export(format))
            }
            ReportMsg::Exported(path) => {
                self.exporting = None;
                self.last_export = Some(path);
                None
            }
            ReportMsg::ExportFailed(error) => {
                self.exporting = None;
                self.error = Some(error);
                None
            }
        }
    }

    fn load(&mut self) -> Option<ReportCommand> {
        if self.loading {
            return None;
        }
        self.loading = true;
        Some(ReportCommand::Load(self.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::WeeklyReport;
    use chrono::{NaiveDate, Utc};

    fn data(source: ReportSource) -> ReportData {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        ReportData {
            source,
            expenses: Vec::new(),
            report: WeeklyReport::generate(&[], today, &Utc),
        }
    }

    #[test]
    fn test_single_outstanding_load() {
        let (mut screen, cmd) = ReportScreen::new(ReportSource::Stored);
        assert_eq!(cmd, ReportCommand::Load(ReportSource::Stored));
        assert_eq!(screen.update(ReportMsg::Refresh), None);

        screen.update(ReportMsg::Loaded(data(ReportSource::Stored)));
        assert!(!screen.loading);
        assert_eq!(
            screen.update(ReportMsg::Refresh),
            Some(ReportCommand::Load(ReportSource::Stored))
        );
    }

    #[test]
    fn test_toggle_source_ignores_old_results() {
        let (mut screen, _) = ReportScreen::new(ReportSource::Stored);
        assert_eq!(
            screen.update(ReportMsg::ToggleSource),
            Some(ReportCommand::Load(ReportSource::Sample))
        );

        screen.update(ReportMsg::Loaded(data(ReportSource::Stored)));
        assert!(screen.data.is_none());
        screen.update(ReportMsg::Loaded(data(ReportSource::Sample)));
        assert_eq!(screen.data.as_ref().unwrap().source, ReportSource::Sample);
    }

    #[test]
    fn test_export_requires_data_and_runs_once() {
        let (mut screen, _) = ReportScreen::new(ReportSource::Stored);
        assert_eq!(screen.update(ReportMsg::Export(ExportFormat::Csv)), None);

        screen.update(ReportMsg::Loaded(data(ReportSource::Stored)));
        assert_eq!(
            screen.update(ReportMsg::Export(ExportFormat::Pdf)),
            Some(ReportCommand::Export(ExportFormat::Pdf))
        );
        assert_eq!(screen.update(ReportMsg::Export(ExportFormat::Csv)), None);

        screen.update(ReportMsg::Exported(PathBuf::from("/tmp/report.pdf")));
        assert_eq!(screen.exporting, None);
        assert_eq!(screen.last_export, Some(PathBuf::from("/tmp/report.pdf")));
    }

    #[test]
    fn test_export_failure_keeps_report() {
        let (mut screen, _) = ReportScreen::new(ReportSource::Stored);
        screen.update(ReportMsg::Loaded(data(ReportSource::Stored)));
        screen.update(ReportMsg::Export(ExportFormat::Csv));
        screen.update(ReportMsg::ExportFailed("read-only".into()));

        assert_eq!(screen.error.as_deref(), Some("read-only"));
        assert!(screen.data.is_some());
        assert!(screen.update(ReportMsg::Export(ExportFormat::Csv)).is_some());
    }
}
