//! # TextField
//!
//! Single-line editable text with a byte-offset cursor. Used by the login
//! and signup forms and by the chat input.
//!
//! Pasted newlines become spaces since every field here is one line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Changed,
    Submit,
}

#[derive(Debug, Default, Clone)]
pub struct TextField {
    value: String,
    /// Byte offset into `value`, always on a char boundary.
    cursor: usize,
    /// Render `•` instead of the text.
    pub masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let mut field = Self::new();
        field.set_value(value);
        field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Empties the field and returns what it held.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    fn display_text(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Display columns left of the cursor.
    fn cursor_column(&self) -> u16 {
        let before = &self.value[..self.cursor];
        let width = if self.masked {
            before.chars().count()
        } else {
            before.width()
        };
        width.min(u16::MAX as usize) as u16
    }

    /// Draws the field in a bordered box. `placeholder` shows while empty;
    /// the terminal cursor is placed only when `focused`.
    pub fn render_boxed(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        placeholder: &str,
        focused: bool,
        disabled: bool,
    ) {
        let border_style = if focused && !disabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(format!(" {title} "), border_style));

        let inner_width = area.width.saturating_sub(2);
        let cursor_col = self.cursor_column();
        // Scroll horizontally so the cursor stays visible
        let scroll = cursor_col.saturating_sub(inner_width.saturating_sub(1));

        let line = if self.value.is_empty() {
            Line::from(Span::styled(
                placeholder.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            let style = if disabled {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            Line::from(Span::styled(self.display_text(), style))
        };

        let paragraph = Paragraph::new(line).block(block).scroll((0, scroll));
        frame.render_widget(paragraph, area);

        if focused && !disabled && area.height > 2 && inner_width > 0 {
            let x = area.x + 1 + cursor_col.saturating_sub(scroll).min(inner_width - 1);
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(s.len())
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.value.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(FieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                let text: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.value.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(FieldEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.value, self.cursor);
                self.value.drain(prev..self.cursor);
                self.cursor = prev;
                Some(FieldEvent::Changed)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.value.len() {
                    return None;
                }
                let next = next_char_boundary(&self.value, self.cursor);
                self.value.drain(self.cursor..next);
                Some(FieldEvent::Changed)
            }
            TuiEvent::CursorLeft => {
                (self.cursor > 0).then(|| {
                    self.cursor = prev_char_boundary(&self.value, self.cursor);
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorRight => {
                (self.cursor < self.value.len()).then(|| {
                    self.cursor = next_char_boundary(&self.value, self.cursor);
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                FieldEvent::Changed
            }),
            TuiEvent::CursorEnd => (self.cursor != self.value.len()).then(|| {
                self.cursor = self.value.len();
                FieldEvent::Changed
            }),
            TuiEvent::Submit => Some(FieldEvent::Submit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn typing_and_backspace() {
        let mut field = TextField::new();
        type_str(&mut field, "héllo");
        assert_eq!(field.value(), "héllo");
        field.handle_event(&TuiEvent::Backspace);
        field.handle_event(&TuiEvent::CursorLeft);
        field.handle_event(&TuiEvent::CursorLeft);
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.value(), "hll");
    }

    #[test]
    fn edits_in_the_middle() {
        let mut field = TextField::with_value("ac");
        field.handle_event(&TuiEvent::CursorLeft);
        type_str(&mut field, "b");
        assert_eq!(field.value(), "abc");
        field.handle_event(&TuiEvent::CursorHome);
        field.handle_event(&TuiEvent::Delete);
        assert_eq!(field.value(), "bc");
        assert_eq!(field.handle_event(&TuiEvent::CursorHome), None);
    }

    #[test]
    fn paste_flattens_newlines() {
        let mut field = TextField::new();
        field.handle_event(&TuiEvent::Paste("line one\nline two".into()));
        assert_eq!(field.value(), "line one line two");
    }

    #[test]
    fn enter_requests_submit_without_clearing() {
        let mut field = TextField::with_value("x");
        assert_eq!(field.handle_event(&TuiEvent::Submit), Some(FieldEvent::Submit));
        assert_eq!(field.value(), "x");
        assert_eq!(field.take(), "x");
        assert!(field.is_blank());
    }

    #[test]
    fn masked_field_hides_text() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let field = TextField {
            masked: true,
            ..TextField::with_value("hunter22")
        };
        terminal
            .draw(|f| field.render_boxed(f, f.area(), "Password", "", true, false))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(!text.contains("hunter22"));
        assert!(text.contains("••••••••"));
    }

    #[test]
    fn placeholder_when_empty() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let field = TextField::new();
        terminal
            .draw(|f| field.render_boxed(f, f.area(), "Message", "Type your message...", false, false))
            .unwrap();
        assert!(screen_text(&terminal).contains("Type your message..."));
    }
}
