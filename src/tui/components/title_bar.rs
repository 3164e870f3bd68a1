//! # TitleBar Component
//!
//! Top status bar of the dashboard.
//!
//! ## Responsibilities
//!
//! - Show the application name and the signed-in email
//! - Show the current status message (e.g., "Waiting for reply...")
//! - Show "↓ New" when there's unseen content below the scroll position
//! - Show key hints on the right
//!
//! ## Design Decisions
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(email, &app.status_message, has_unseen);
//! title_bar.render(frame, area);
//! ```
//!
//! The props come from different places: `email` and `status_message` from
//! the core `App`, `has_unseen_content` from the message list scroll state.
//!
//! ## Conditional Formatting
//!
//! 1. **Unseen content**: `"HealthFirst | a@b.com | Loading... | ↓ New"`
//! 2. **Status message**: `"HealthFirst | a@b.com | Loading..."`
//! 3. **Default**: `"HealthFirst | a@b.com"`
//!
//! Hints are dropped first when the terminal is too narrow for both.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub const APP_NAME: &str = "HealthFirst";
pub const KEY_HINTS: &str = "Tab Focus  Ctrl+N New chat  Ctrl+L Logout  Ctrl+C Quit";

/// Top status bar component.
pub struct TitleBar<'a> {
    /// Signed-in email, if known
    pub email: Option<&'a str>,
    /// Status message (e.g., "Loading messages...")
    pub status_message: &'a str,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(email: Option<&'a str>, status_message: &'a str, has_unseen_content: bool) -> Self {
        Self {
            email,
            status_message,
            has_unseen_content,
        }
    }

    fn left_spans(&self) -> Vec<Span<'a>> {
        let separator = || Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![Span::styled(
            APP_NAME,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if let Some(email) = self.email {
            spans.push(separator());
            spans.push(Span::raw(email));
        }
        if !self.status_message.is_empty() {
            spans.push(separator());
            spans.push(Span::styled(
                self.status_message,
                Style::default().fg(Color::Yellow),
            ));
        }
        if self.has_unseen_content {
            spans.push(separator());
            spans.push(Span::styled(
                "↓ New",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        }
        spans
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let left = Line::from(self.left_spans());
        let left_width = left.width() as u16;
        let hints_width = KEY_HINTS.width() as u16;

        if left_width + 2 + hints_width > area.width {
            frame.render_widget(Paragraph::new(left), area);
            return;
        }

        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(left_width), Constraint::Length(hints_width)])
                .areas(area);
        frame.render_widget(Paragraph::new(left), left_area);
        frame.render_widget(
            Paragraph::new(Line::from(KEY_HINTS).right_aligned())
                .style(Style::default().fg(Color::DarkGray)),
            right_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_unseen_content() {
        let mut title_bar = TitleBar::new(Some("a@b.com"), "Waiting for reply...", true);
        let text = render(&mut title_bar, 140);
        assert!(text.contains("HealthFirst"));
        assert!(text.contains("a@b.com"));
        assert!(text.contains("Waiting for reply..."));
        assert!(text.contains("↓ New"));
        assert!(text.contains("Ctrl+N New chat"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new(Some("a@b.com"), "", false);
        let text = render(&mut title_bar, 140);
        assert!(text.contains("HealthFirst | a@b.com"));
        assert_eq!(text.matches('|').count(), 1);
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_narrow_drops_hints() {
        let mut title_bar = TitleBar::new(None, "Loading...", false);
        let text = render(&mut title_bar, 30);
        assert!(text.contains("HealthFirst | Loading..."));
        assert!(!text.contains("Ctrl+N"));
    }
}
