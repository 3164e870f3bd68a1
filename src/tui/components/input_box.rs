//! # InputBox Component
//!
//! Message input at the bottom of the dashboard.
//!
//! ## Responsibilities
//!
//! - Capture text input (editing is delegated to `TextField`)
//! - Handle submission (Enter), clearing the buffer
//! - Render dimmed and refuse submission while disabled
//!
//! ## State Management
//!
//! The buffer is internal state. `disabled` and `focused` are props copied
//! from the application state before each render.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;

pub const PLACEHOLDER: &str = "Type your message...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    ContentChanged,
}

/// Chat input component.
pub struct InputBox {
    /// Text buffer (Internal State)
    pub field: TextField,
    /// No active session, or a send/load is in flight (Prop)
    pub disabled: bool,
    /// Keyboard focus is here rather than on the sidebar (Prop)
    pub focused: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            field: TextField::new(),
            disabled: false,
            focused: true,
        }
    }

    pub fn buffer(&self) -> &str {
        self.field.value()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.field.render_boxed(
            frame,
            area,
            "Message",
            PLACEHOLDER,
            self.focused,
            self.disabled,
        );
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match self.field.handle_event(event)? {
            FieldEvent::Submit => {
                // Typed text survives a refused submit
                if self.disabled || self.field.is_blank() {
                    return None;
                }
                Some(InputEvent::Submit(self.field.take()))
            }
            FieldEvent::Changed => Some(InputEvent::ContentChanged),
        }
    }
}
