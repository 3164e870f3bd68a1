//! # Auth Form Component
//!
//! Login and signup screens. One state struct serves both; `mode` decides
//! whether the confirmation field exists.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `AuthFormState` lives in `TuiState` and owns the typed text
//! - `AuthForm` is created each frame with the error/notice props from `App`

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::api::Secret;
use crate::core::action::Action;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Password,
    Confirm,
}

pub struct AuthFormState {
    pub mode: AuthMode,
    pub email: TextField,
    pub password: TextField,
    pub confirm: TextField,
    focus: Field,
}

impl AuthFormState {
    pub fn new(mode: AuthMode, email: Option<&str>) -> Self {
        let mut state = Self {
            mode,
            email: TextField::with_value(email.unwrap_or_default()),
            password: TextField::masked(),
            confirm: TextField::masked(),
            focus: Field::Email,
        };
        if !state.email.is_blank() {
            state.focus = Field::Password;
        }
        state
    }

    /// Switch screens keeping the typed email; passwords never carry over.
    pub fn reset(&mut self, mode: AuthMode) {
        let email = self.email.value().to_string();
        *self = Self::new(mode, Some(&email));
    }

    fn fields(&self) -> &'static [Field] {
        match self.mode {
            AuthMode::Login => &[Field::Email, Field::Password],
            AuthMode::Signup => &[Field::Email, Field::Password, Field::Confirm],
        }
    }

    fn move_focus(&mut self, step: isize) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(fields.len() as isize) as usize;
        self.focus = fields[next];
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::Confirm => &mut self.confirm,
        }
    }

    fn submit_action(&self) -> Action {
        let email = self.email.value().to_string();
        let password = Secret::new(self.password.value());
        match self.mode {
            AuthMode::Login => Action::SubmitLogin { email, password },
            AuthMode::Signup => Action::SubmitSignup {
                email,
                password,
                confirm: Secret::new(self.confirm.value()),
            },
        }
    }
}

impl EventHandler for AuthFormState {
    /// The submit action, built from the typed fields.
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::FocusNext | TuiEvent::CursorDown => {
                self.move_focus(1);
                None
            }
            TuiEvent::FocusPrev | TuiEvent::CursorUp => {
                self.move_focus(-1);
                None
            }
            _ => match self.focused_field().handle_event(event)? {
                FieldEvent::Submit => Some(self.submit_action()),
                FieldEvent::Changed => None,
            },
        }
    }
}

/// Transient render wrapper for the login/signup screen.
pub struct AuthForm<'a> {
    pub state: &'a AuthFormState,
    pub error: Option<&'a str>,
    pub notice: Option<&'a str>,
    pub submitting: bool,
}

impl AuthForm<'_> {
    fn title(&self) -> &'static str {
        match self.state.mode {
            AuthMode::Login => " Login ",
            AuthMode::Signup => " Sign Up ",
        }
    }

    fn help(&self) -> &'static str {
        match self.state.mode {
            AuthMode::Login => " Enter Login  Tab Next  Ctrl+S Sign up ",
            AuthMode::Signup => " Enter Sign up  Tab Next  Ctrl+S Login ",
        }
    }

    fn status_line(&self) -> Option<Line<'static>> {
        if self.submitting {
            let text = match self.state.mode {
                AuthMode::Login => "Logging in...",
                AuthMode::Signup => "Signing up...",
            };
            return Some(Line::styled(text, Style::default().fg(Color::Yellow)));
        }
        if let Some(error) = self.error {
            return Some(Line::styled(
                error.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        self.notice
            .map(|notice| Line::styled(notice.to_string(), Style::default().fg(Color::Green)))
    }
}

impl Component for AuthForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let field_count = self.state.fields().len() as u16;
        // status + fields + borders
        let height = (1 + field_count * 3 + 4).min(area.height);
        let [column] = Layout::horizontal([Constraint::Max(60)])
            .flex(Flex::Center)
            .areas(area);
        let [form_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);

        frame.render_widget(Clear, form_area);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                self.title(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(self.help()).centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let mut rows = vec![Constraint::Length(1)];
        rows.extend(std::iter::repeat_n(Constraint::Length(3), field_count as usize));
        let areas = Layout::vertical(rows).split(inner);

        if let Some(line) = self.status_line() {
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), areas[0]);
        }

        for (i, field) in self.state.fields().iter().enumerate() {
            let Some(&field_area) = areas.get(i + 1) else {
                break;
            };
            let (text, title, placeholder) = match field {
                Field::Email => (&self.state.email, "Email", "Enter your email"),
                Field::Password => {
                    let placeholder = match self.state.mode {
                        AuthMode::Login => "Enter your password",
                        AuthMode::Signup => "Create a password",
                    };
                    (&self.state.password, "Password", placeholder)
                }
                Field::Confirm => (&self.state.confirm, "Confirm Password", "Confirm your password"),
            };
            text.render_boxed(
                frame,
                field_area,
                title,
                placeholder,
                self.state.focus == *field,
                self.submitting,
            );
        }
    }
}
