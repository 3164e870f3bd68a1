use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen that renders itself into a `Rect`.
///
/// Props arrive as struct fields; anything that must survive between frames
/// lives in a separate `*State` struct the component borrows mutably, so
/// `render` may update caches and scroll offsets while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level terminal events into its own events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Returns `Some` when the event means something to the parent.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
