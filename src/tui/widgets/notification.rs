//! Toast notifications
//!
//! Short-lived messages shown in the corner after a save, delete, export or
//! sync. Expired toasts are dropped on every tick.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::tui::theme::Palette;

const DEFAULT_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Success,
    Error,
}

impl NotificationType {
    pub fn color(&self, palette: &Palette) -> Color {
        match self {
            Self::Info => palette.accent,
            Self::Success => palette.positive,
            Self::Error => palette.error,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Done",
            Self::Error => "Error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    created_at: Instant,
    duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    /// Errors stay up twice as long
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error).with_duration(DEFAULT_DURATION * 2)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }
}

pub struct NotificationWidget<'a> {
    notification: &'a Notification,
    palette: &'a Palette,
}

impl<'a> NotificationWidget<'a> {
    pub fn new(notification: &'a Notification, palette: &'a Palette) -> Self {
        Self {
            notification,
            palette,
        }
    }
}

impl Widget for NotificationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = self.notification.notification_type.color(self.palette);
        let title = self.notification.notification_type.title();

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .style(self.palette.text());

        Paragraph::new(self.notification.message.as_str())
            .style(self.palette.text())
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

/// Pending toasts, oldest first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn remove_expired(&mut self) {
        let now = Instant::now();
        self.notifications.retain(|n| !n.is_expired_at(now));
    }

    pub fn current(&self) -> Option<&Notification> {
        self.notifications.first()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_shows_oldest_first() {
        let mut queue = NotificationQueue::new();
        assert!(queue.is_empty());

        queue.push(Notification::success("Saved Lunch"));
        queue.push(Notification::error("Export failed"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().unwrap().message, "Saved Lunch");
    }

    #[test]
    fn test_expiry() {
        let note = Notification::info("Synced").with_duration(Duration::from_millis(10));
        let later = Instant::now() + Duration::from_secs(1);
        assert!(note.is_expired_at(later));
        assert!(!Notification::info("Synced").is_expired_at(Instant::now()));

        let mut queue = NotificationQueue::new();
        queue.push(Notification::info("gone").with_duration(Duration::ZERO));
        queue.remove_expired();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_error_colour_follows_palette() {
        let palette = Palette::default();
        assert_eq!(NotificationType::Error.color(&palette), palette.error);
        assert_eq!(NotificationType::Success.color(&palette), palette.positive);
    }
}
