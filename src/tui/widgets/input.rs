//! Text input widget
//!
//! A single-line text field with cursor support. The cursor is a character
//! index, so editing never splits a multi-byte character.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A simple text input widget
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position, in characters
    pub cursor: usize,
    /// Whether the input is focused
    pub focused: bool,
    /// Placeholder text
    pub placeholder: String,
    /// Label
    pub label: String,
}

impl TextInput {
    /// Create a new text input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set focused state
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set content, placing the cursor at the end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self.cursor = self.char_count();
        self
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }
}

impl Widget for TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = if self.label.is_empty() {
            0
        } else {
            self.label.chars().count() as u16 + 2
        };
        let input_start = area.x + label_width.min(area.width);

        if !self.label.is_empty() {
            let label_line = Line::from(vec![
                Span::styled(&self.label, Style::default().fg(Color::Cyan)),
                Span::raw(": "),
            ]);
            buf.set_line(area.x, area.y, &label_line, label_width.min(area.width));
        }

        let showing_placeholder = self.content.is_empty() && !self.focused;
        let (display_text, text_style) = if showing_placeholder {
            (&self.placeholder, Style::default().fg(Color::DarkGray))
        } else if self.focused {
            (&self.content, Style::default().fg(Color::White))
        } else {
            (&self.content, Style::default().fg(Color::Yellow))
        };

        let text_width = (area.x + area.width).saturating_sub(input_start) as usize;
        buf.set_stringn(input_start, area.y, display_text, text_width, text_style);

        if self.focused {
            let cursor_x = input_start.saturating_add(self.cursor as u16);
            if cursor_x < area.x + area.width {
                let cursor_char = self.content.chars().nth(self.cursor).unwrap_or('_');
                buf.set_string(
                    cursor_x,
                    area.y,
                    cursor_char.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = TextInput::new();
        for c in "12.5".chars() {
            input.insert(c);
        }
        input.insert('0');
        assert_eq!(input.value(), "12.50");

        input.backspace();
        assert_eq!(input.value(), "12.5");
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn test_editing_in_the_middle() {
        let mut input = TextInput::new().content("2024-0115");
        input.move_left();
        input.move_left();
        input.insert('-');
        assert_eq!(input.value(), "2024-01-15");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "024-01-15");
        input.move_end();
        assert_eq!(input.cursor, 9);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = TextInput::new().content("€5");
        assert_eq!(input.cursor, 2);

        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "5");

        input.insert('£');
        assert_eq!(input.value(), "£5");
        input.move_right();
        input.move_right();
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_clear() {
        let mut input = TextInput::new().content("abc");
        input.clear();
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);
        input.backspace();
        input.move_left();
        assert_eq!(input.cursor, 0);
    }
}
