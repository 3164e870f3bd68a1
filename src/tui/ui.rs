use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::auth_gate::Screen;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{AuthForm, LoadingScreen, MessageList, Sidebar, TitleBar};

pub const SIDEBAR_WIDTH: u16 = 36;
const INPUT_HEIGHT: u16 = 3;

/// Screen regions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardAreas {
    pub title: Rect,
    pub sidebar: Rect,
    pub messages: Rect,
    pub input: Rect,
}

/// Split the frame into the dashboard regions. Shared by drawing and mouse
/// hit testing so the two never disagree.
pub fn dashboard_areas(frame_area: Rect) -> DashboardAreas {
    use Constraint::{Length, Min};
    let [title, body] = Layout::vertical([Length(1), Min(0)]).areas(frame_area);
    let sidebar_width = SIDEBAR_WIDTH.min(frame_area.width / 2);
    let [sidebar, main] = Layout::horizontal([Length(sidebar_width), Min(0)]).areas(body);
    let [messages, input] = Layout::vertical([Min(0), Length(INPUT_HEIGHT)]).areas(main);
    DashboardAreas {
        title,
        sidebar,
        messages,
        input,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let area = frame.area();
    match app.screen {
        Screen::Loading => LoadingScreen::new(spinner_frame).render(frame, area),
        Screen::Login => AuthForm {
            state: &tui.auth_form,
            error: app.login.error.as_deref(),
            notice: app.login.notice.as_deref(),
            submitting: app.login.submitting,
        }
        .render(frame, area),
        Screen::Signup => AuthForm {
            state: &tui.auth_form,
            error: app.signup.error.as_deref(),
            notice: None,
            submitting: app.signup.submitting,
        }
        .render(frame, area),
        Screen::Dashboard => draw_dashboard(frame, app, tui, spinner_frame),
    }
}

fn draw_dashboard(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let areas = dashboard_areas(frame.area());

    Sidebar::new(
        &mut tui.sidebar,
        &app.sessions.sessions,
        app.active_session_id.as_deref(),
        tui.focus == DashboardFocus::Sidebar,
        app.sessions.loaded,
    )
    .render(frame, areas.sidebar);

    MessageList::new(
        &mut tui.message_list,
        &app.thread.messages,
        app.thread.generation,
        app.thread.loading_history,
        app.thread.sending,
        spinner_frame,
    )
    .render(frame, areas.messages);

    // Rendered after the list so the unseen indicator reflects this frame
    TitleBar::new(
        app.auth.email(),
        &app.status_message,
        tui.message_list.has_unseen_content(),
    )
    .render(frame, areas.title);

    tui.input_box.disabled = app.input_disabled();
    tui.input_box.focused = tui.focus == DashboardFocus::Input;
    tui.input_box.render(frame, areas.input);
}

/// Which dashboard pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardFocus {
    Sidebar,
    Input,
}

/// Hit test: the sidebar row (relative to the list's first item) under the
/// given screen position, if any.
pub fn hit_test_sidebar(column: u16, row: u16, frame_area: Rect) -> Option<u16> {
    let sidebar = dashboard_areas(frame_area).sidebar;
    // Inside the border
    let top = sidebar.y + 1;
    let bottom = (sidebar.y + sidebar.height).saturating_sub(1);
    let left = sidebar.x + 1;
    let right = (sidebar.x + sidebar.width).saturating_sub(1);
    if row < top || row >= bottom || column < left || column >= right {
        return None;
    }
    Some(row - top)
}

/// True when the position falls on the message input.
pub fn hit_test_input(column: u16, row: u16, frame_area: Rect) -> bool {
    let input = dashboard_areas(frame_area).input;
    input.contains(ratatui::layout::Position { x: column, y: row })
}
