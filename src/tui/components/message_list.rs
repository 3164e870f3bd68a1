//! # MessageList Component
//!
//! Scrollable chat box for the active session.
//!
//! ## Responsibilities
//!
//! - Display the messages of the active session
//! - Stick to the bottom on new messages unless the user scrolled up
//! - Cache per-message heights so long threads stay cheap to lay out
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice
//! (props). Messages are append-only between full reloads, so cached heights
//! stay valid until the width or the thread generation changes.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

pub const EMPTY_STATE: &str = "Start a conversation with HealthFirst!";
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// True when messages exist below the viewport.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [api::Message],
    /// Thread generation; a change means the list was replaced wholesale.
    pub generation: u64,
    pub loading_history: bool,
    pub sending: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [api::Message],
        generation: u64,
        loading_history: bool,
        sending: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            generation,
            loading_history,
            sending,
            spinner_frame,
        }
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect) {
        let text = if self.loading_history {
            format!("{} Loading messages...", spinner(self.spinner_frame))
        } else {
            EMPTY_STATE.to_string()
        };
        let y = area.y + area.height / 2;
        let line_area = Rect::new(area.x, y, area.width, 1.min(area.height));
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            line_area,
        );
    }
}

fn spinner(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let count = self.messages.len();

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        if layout.generation != self.generation {
            self.state.stick_to_bottom = true;
        }
        let reusable = layout.reusable_count(count, content_width, self.generation);
        layout.heights.truncate(reusable);
        for message in self.messages.iter().skip(layout.heights.len()) {
            layout.heights.push(Message::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(count, content_width, self.generation);

        if count == 0 {
            self.state.scroll_state = ScrollViewState::default();
            self.render_placeholder(frame, area);
            return;
        }

        let total_height = self.state.layout.total_height();
        let waiting_row = u16::from(self.sending);
        let canvas_height = self.state.layout.canvas_height(waiting_row);

        // 2. Clamp scroll offset to the content
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible_range {
            let rect = Rect::new(
                0,
                self.state.layout.offset_of(i),
                content_width,
                self.state.layout.heights[i],
            );
            scroll_view.render_widget(Message::new(&self.messages[i]), rect);
        }

        if self.sending {
            let rect = Rect::new(0, total_height, content_width, 1);
            scroll_view.render_widget(
                Paragraph::new(format!("{} Bot is typing...", spinner(self.spinner_frame)))
                    .style(Style::default().fg(Color::Blue).add_modifier(Modifier::ITALIC)),
                rect,
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
    generation: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many cached heights are still valid for the given props.
    pub fn reusable_count(&self, message_count: usize, content_width: u16, generation: u64) -> usize {
        if self.content_width != content_width || self.generation != generation {
            return 0;
        }
        // Fewer messages than cached means the thread was cleared
        if message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16, generation: u64) {
        self.message_count = message_count;
        self.content_width = content_width;
        self.generation = generation;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Height of the scroll canvas: every message plus `extra_rows` below.
    pub fn canvas_height(&self, extra_rows: u16) -> u16 {
        self.total_height().saturating_add(extra_rows)
    }

    /// Top row of message `index` on the canvas.
    pub fn offset_of(&self, index: usize) -> u16 {
        match index {
            0 => 0,
            i => self.prefix_heights.get(i - 1).copied().unwrap_or_else(|| self.total_height()),
        }
    }

    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
