//! # Sidebar Component
//!
//! "Previous Chats" list on the left of the dashboard. Selecting an item
//! switches the active session; `n` starts a new chat.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` and tracks the cursor
//! - `Sidebar` is created each frame with the session list and active id

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Padding, Paragraph};

use crate::api::Session;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const SIDEBAR_TITLE: &str = " Previous Chats ";

/// Events emitted by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
    Select(String),
    NewChat,
}

/// Persistent cursor state for the sidebar.
#[derive(Default)]
pub struct SidebarState {
    /// Ids in display order, refreshed from the store each frame.
    ids: Vec<String>,
    pub selected: usize,
    pub list_state: ListState,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the store's list. The cursor stays on the same id when it
    /// survives, so prepending a new chat doesn't move the user's place.
    pub fn sync(&mut self, sessions: &[Session]) {
        let current = self.ids.get(self.selected).cloned();
        self.ids = sessions.iter().map(|s| s.session_id.clone()).collect();
        if self.ids.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
            return;
        }
        self.selected = current
            .and_then(|id| self.ids.iter().position(|s| *s == id))
            .unwrap_or(0)
            .min(self.ids.len() - 1);
        self.list_state.select(Some(self.selected));
    }

    /// Move the cursor onto `id` if it is listed.
    pub fn select_id(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.selected = pos;
            self.list_state.select(Some(pos));
        }
    }

    /// Translate a click row (relative to the list's inner area) into a
    /// selection, accounting for the list's scroll offset.
    pub fn select_row(&mut self, row: u16) -> Option<SidebarEvent> {
        let index = self.list_state.offset() + row as usize;
        let id = self.ids.get(index)?.clone();
        self.selected = index;
        self.list_state.select(Some(index));
        Some(SidebarEvent::Select(id))
    }
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                if !self.ids.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.ids.is_empty() {
                    self.selected = (self.selected + 1).min(self.ids.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .ids
                .get(self.selected)
                .map(|id| SidebarEvent::Select(id.clone())),
            TuiEvent::InputChar('n') => Some(SidebarEvent::NewChat),
            _ => None,
        }
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    pub state: &'a mut SidebarState,
    pub sessions: &'a [Session],
    pub active_session_id: Option<&'a str>,
    pub focused: bool,
    pub loaded: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(
        state: &'a mut SidebarState,
        sessions: &'a [Session],
        active_session_id: Option<&'a str>,
        focused: bool,
        loaded: bool,
    ) -> Self {
        Self {
            state,
            sessions,
            active_session_id,
            focused,
            loaded,
        }
    }

    fn item(&self, index: usize, session: &Session, width: usize) -> ListItem<'static> {
        let is_active = self.active_session_id == Some(session.session_id.as_str());
        let is_cursor = self.focused && index == self.state.selected;

        let mut title_style = if is_active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if is_cursor {
            title_style = title_style.add_modifier(Modifier::REVERSED);
        }
        let marker = if is_active { "● " } else { "  " };

        // One row per session keeps click rows equal to item indices
        let title = truncate_str(&session.title(), width.saturating_sub(2));
        let mut spans = vec![
            Span::styled(marker, title_style),
            Span::styled(title.clone(), title_style),
        ];
        let room = width.saturating_sub(2 + title.chars().count() + 1);
        let updated = session.updated_label();
        if !updated.is_empty() && room > 3 {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                truncate_str(&updated, room),
                Style::default().fg(Color::DarkGray),
            ));
        }
        ListItem::new(Line::from(spans))
    }
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(self.sessions);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(SIDEBAR_TITLE, border_style.add_modifier(Modifier::BOLD)))
            .padding(Padding::horizontal(1));

        if self.sessions.is_empty() {
            let text = if self.loaded { "No chats yet." } else { "Loading..." };
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let width = area.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .sessions
            .iter()
            .enumerate()
            .map(|(i, session)| self.item(i, session, width))
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{head}...")
    }
}
