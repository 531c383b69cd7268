//! Single-line text input
//!
//! The cursor is a character index, so multi-byte input edits cleanly.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::theme::Palette;

/// Editable text with a cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    content: String,
    /// Cursor position in characters
    cursor: usize,
}

impl TextInput {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.content
            .char_indices()
            .nth(chars)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn len_chars(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.len_chars() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len_chars() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len_chars();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }
}

/// Renders a labelled field; the cursor is drawn only when focused
pub struct InputField<'a> {
    label: &'a str,
    value: &'a str,
    cursor: Option<usize>,
    placeholder: &'a str,
    palette: &'a Palette,
}

impl<'a> InputField<'a> {
    pub fn new(label: &'a str, value: &'a str, palette: &'a Palette) -> Self {
        Self {
            label,
            value,
            cursor: None,
            placeholder: "",
            palette,
        }
    }

    /// Show the input as focused, with its cursor
    pub fn editing(mut self, input: &'a TextInput) -> Self {
        self.value = input.value();
        self.cursor = Some(input.cursor());
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// Width reserved for field labels so values line up
pub const LABEL_WIDTH: u16 = 11;

impl Widget for InputField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let focused = self.cursor.is_some();

        let label_style = if focused {
            palette.title()
        } else {
            Style::default().fg(palette.accent)
        };
        let label = Line::from(vec![
            Span::styled(self.label, label_style),
            Span::raw(":"),
        ]);
        buf.set_line(area.x, area.y, &label, LABEL_WIDTH);

        let input_x = area.x + LABEL_WIDTH;
        let input_width = area.width.saturating_sub(LABEL_WIDTH) as usize;
        if input_width == 0 {
            return;
        }

        if self.value.is_empty() && !focused {
            buf.set_stringn(input_x, area.y, self.placeholder, input_width, palette.dim());
            return;
        }

        // Scroll so the cursor stays visible
        let cursor = self.cursor.unwrap_or(0);
        let skip = (cursor + 1).saturating_sub(input_width);
        let visible: String = self.value.chars().skip(skip).collect();
        buf.set_stringn(input_x, area.y, &visible, input_width, palette.text());

        if focused {
            let cursor_x = input_x + (cursor - skip) as u16;
            if cursor_x < area.x + area.width {
                let under = self.value.chars().nth(cursor).unwrap_or(' ');
                buf.set_string(
                    cursor_x,
                    area.y,
                    under.to_string(),
                    palette.text().add_modifier(Modifier::REVERSED),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_cursor_movement() {
        let mut input = TextInput::new("Lunh");
        input.move_left();
        input.insert('c');
        assert_eq!(input.value(), "Lunch");
        assert_eq!(input.cursor(), 4);

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "unch");
        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "unc");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("Café");
        input.backspace();
        assert_eq!(input.value(), "Caf");
        input.insert('é');
        input.insert('!');
        assert_eq!(input.value(), "Café!");
        input.move_left();
        input.move_left();
        input.delete();
        assert_eq!(input.value(), "Caf!");
    }

    #[test]
    fn test_render_focused_field() {
        let palette = Palette::default();
        let input = TextInput::new("12.50");
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);

        InputField::new("Amount", "", &palette)
            .editing(&input)
            .render(area, &mut buf);

        let line: String = buf.content.iter().map(|cell| cell.symbol()).collect();
        assert!(line.starts_with("Amount:"));
        assert!(line.contains("12.50"));
    }

    #[test]
    fn test_placeholder_when_empty() {
        let palette = Palette::default();
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);

        InputField::new("Note", "", &palette)
            .placeholder("optional")
            .render(area, &mut buf);

        let line: String = buf.content.iter().map(|cell| cell.symbol()).collect();
        assert!(line.contains("optional"));
    }
}
