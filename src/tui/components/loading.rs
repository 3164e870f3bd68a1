//! # Loading Screen Component
//!
//! Shown while the startup auth check is in flight.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingScreen {
    frame_index: usize,
}

impl LoadingScreen {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }
}

impl Component for LoadingScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER[self.frame_index % SPINNER.len()];
        let text_lines = vec![
            Line::from(Span::styled(
                "HealthFirst",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{spinner} Loading..."),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let [text_area] = Layout::vertical([Constraint::Length(text_lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(
            Paragraph::new(text_lines).alignment(Alignment::Center),
            text_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn renders_name_and_spinner() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| LoadingScreen::new(3).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("HealthFirst"));
        assert!(text.contains("⠸ Loading..."));
    }
}
