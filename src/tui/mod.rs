//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! Every leaf effect returned by a dispatch is spawned as its own tokio task
//! running [`runtime::perform`]. Results come back over an mpsc channel and
//! are dispatched on the UI thread, so the store is only ever touched here.
//!
//! ## Redraw Strategy
//!
//! A store subscriber raises a dirty flag on every dispatch. The loop draws
//! when that flag is set, when a terminal event arrived, or continuously
//! (~12fps) while a spinner is visible. Idle, it sleeps up to 500ms.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::api::ChatBackend;
use crate::core::action::{Action, Effect};
use crate::core::auth_gate::{Route, Screen};
use crate::core::config::ResolvedConfig;
use crate::core::runtime;
use crate::core::state::App;
use crate::core::store::Store;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AuthFormState, AuthMode, InputBox, InputEvent, MessageListState, SidebarEvent, SidebarState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::{DashboardFocus, hit_test_input, hit_test_sidebar};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub auth_form: AuthFormState,
    pub sidebar: SidebarState,
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub focus: DashboardFocus,
    /// Screen the component states were last reset for
    last_screen: Option<Screen>,
    /// Pre-fills the login email when the form is empty
    default_email: Option<String>,
}

impl TuiState {
    pub fn new(default_email: Option<String>) -> Self {
        Self {
            auth_form: AuthFormState::new(AuthMode::Login, default_email.as_deref()),
            sidebar: SidebarState::new(),
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            focus: DashboardFocus::Input,
            last_screen: None,
            default_email,
        }
    }

    /// Reset component state when the app moved to another screen.
    pub fn sync_screen(&mut self, app: &App) {
        if self.last_screen == Some(app.screen) {
            return;
        }
        debug!("Screen {:?} -> {:?}", self.last_screen, app.screen);
        self.last_screen = Some(app.screen);

        match app.screen {
            Screen::Loading => {}
            Screen::Login | Screen::Signup => {
                let mode = if app.screen == Screen::Login {
                    AuthMode::Login
                } else {
                    AuthMode::Signup
                };
                if self.auth_form.email.is_blank() {
                    self.auth_form = AuthFormState::new(mode, self.default_email.as_deref());
                } else {
                    self.auth_form.reset(mode);
                }
            }
            Screen::Dashboard => {
                self.sidebar = SidebarState::new();
                self.message_list = MessageListState::new();
                self.input_box = InputBox::new();
                self.focus = DashboardFocus::Input;
            }
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: redraws reset the blink timer
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// Translate one terminal event into the action it stands for, updating
/// component state along the way.
pub fn route_event(
    app: &App,
    tui: &mut TuiState,
    event: &TuiEvent,
    frame_area: Rect,
) -> Option<Action> {
    // Ctrl+C always quits
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    match app.screen {
        Screen::Loading => None,
        Screen::Login => match event {
            TuiEvent::ToggleAuthScreen => Some(Action::Navigate(Route::Signup)),
            _ => tui.auth_form.handle_event(event),
        },
        Screen::Signup => match event {
            TuiEvent::ToggleAuthScreen => Some(Action::Navigate(Route::Login)),
            _ => tui.auth_form.handle_event(event),
        },
        Screen::Dashboard => route_dashboard_event(app, tui, event, frame_area),
    }
}

fn route_dashboard_event(
    app: &App,
    tui: &mut TuiState,
    event: &TuiEvent,
    frame_area: Rect,
) -> Option<Action> {
    match event {
        TuiEvent::NewChat => return Some(Action::NewChat),
        TuiEvent::Logout => return Some(Action::Logout),
        TuiEvent::Escape => {
            tui.focus = DashboardFocus::Input;
            return None;
        }
        TuiEvent::FocusNext | TuiEvent::FocusPrev => {
            tui.focus = match tui.focus {
                DashboardFocus::Sidebar => DashboardFocus::Input,
                DashboardFocus::Input => DashboardFocus::Sidebar,
            };
            return None;
        }
        // Scroll events always go to the MessageList regardless of focus
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            return None;
        }
        TuiEvent::MouseClick(column, row) => {
            if let Some(list_row) = hit_test_sidebar(*column, *row, frame_area) {
                tui.focus = DashboardFocus::Sidebar;
                tui.sidebar.sync(&app.sessions.sessions);
                if let Some(SidebarEvent::Select(id)) = tui.sidebar.select_row(list_row) {
                    return Some(Action::SelectSession(id));
                }
            } else if hit_test_input(*column, *row, frame_area) {
                tui.focus = DashboardFocus::Input;
            }
            return None;
        }
        _ => {}
    }

    match tui.focus {
        DashboardFocus::Sidebar => {
            tui.sidebar.sync(&app.sessions.sessions);
            match event {
                // Typing anything but the new-chat key moves to the input
                TuiEvent::InputChar(c) if *c != 'n' => {
                    tui.focus = DashboardFocus::Input;
                    route_input_event(app, tui, event)
                }
                TuiEvent::Paste(_) => {
                    tui.focus = DashboardFocus::Input;
                    route_input_event(app, tui, event)
                }
                _ => match tui.sidebar.handle_event(event)? {
                    SidebarEvent::Select(id) => Some(Action::SelectSession(id)),
                    SidebarEvent::NewChat => Some(Action::NewChat),
                },
            }
        }
        DashboardFocus::Input => route_input_event(app, tui, event),
    }
}

fn route_input_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    tui.input_box.disabled = app.input_disabled();
    match tui.input_box.handle_event(event)? {
        InputEvent::Submit(text) => Some(Action::SubmitMessage(text)),
        InputEvent::ContentChanged => None,
    }
}

/// Spawn a task per leaf effect; each sends its result action back on `tx`.
/// Returns `true` if the effect asked to quit.
fn spawn_effects(
    effect: Effect,
    backend: &Arc<dyn ChatBackend>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let mut quit = false;
    for effect in effect.flatten() {
        if effect == Effect::Quit {
            quit = true;
            continue;
        }
        info!("Spawning {:?}", effect);
        let backend = Arc::clone(backend);
        let tx = tx.clone();
        tokio::spawn(async move {
            let Some(action) = runtime::perform(effect, backend.as_ref()).await else {
                return;
            };
            if tx.send(action).is_err() {
                warn!("Failed to send effect result: receiver dropped");
            }
        });
    }
    quit
}

/// True while something on screen animates.
fn is_animating(app: &App) -> bool {
    app.screen == Screen::Loading
        || app.thread.loading_history
        || app.thread.sending
        || app.login.submitting
        || app.signup.submitting
}

pub fn run(config: &ResolvedConfig, backend: Arc<dyn ChatBackend>) -> std::io::Result<()> {
    info!("Starting UI against {} backend", backend.name());
    let mut store = Store::new(App::from_config(config));
    let mut tui = TuiState::new(config.email.clone());

    let dirty = Arc::new(AtomicBool::new(true)); // Force first frame
    let flag = Arc::clone(&dirty);
    store.subscribe(move |_| flag.store(true, Ordering::Relaxed));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut should_quit = spawn_effects(store.dispatch(Action::AppStarted), &backend, &tx);

    while !should_quit {
        tui.sync_screen(store.app());

        let animating = is_animating(store.app());
        if animating || dirty.swap(false, Ordering::Relaxed) {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, store.app(), &mut tui, spinner_frame))?;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            dirty.store(true, Ordering::Relaxed);
        }

        // Process first event + drain ALL pending events before next draw
        let frame_area = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            tui.sync_screen(store.app());
            if let Some(action) = route_event(store.app(), &mut tui, &event, frame_area) {
                let effect = store.dispatch(action);
                should_quit |= spawn_effects(effect, &backend, &tx);
            }
            if should_quit {
                break;
            }
        }

        // Handle results of background effects
        while let Ok(action) = rx.try_recv() {
            let effect = store.dispatch(action);
            should_quit |= spawn_effects(effect, &backend, &tx);
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dashboard_app, session, test_app};

    const FRAME: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 24,
    };

    fn send(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
        tui.sync_screen(app);
        route_event(app, tui, &event, FRAME)
    }

    fn type_str(app: &App, tui: &mut TuiState, s: &str) {
        for c in s.chars() {
            assert!(send(app, tui, TuiEvent::InputChar(c)).is_none());
        }
    }

    fn login_app() -> App {
        let mut app = test_app();
        app.screen = Screen::Login;
        app
    }

    #[test]
    fn force_quit_on_every_screen() {
        let mut tui = TuiState::new(None);
        for app in [test_app(), login_app(), dashboard_app()] {
            assert!(matches!(
                send(&app, &mut tui, TuiEvent::ForceQuit),
                Some(Action::Quit)
            ));
        }
    }

    #[test]
    fn loading_screen_ignores_input() {
        let mut tui = TuiState::new(None);
        assert!(send(&test_app(), &mut tui, TuiEvent::InputChar('x')).is_none());
        assert!(send(&test_app(), &mut tui, TuiEvent::Submit).is_none());
    }

    #[test]
    fn login_form_submits_typed_credentials() {
        let app = login_app();
        let mut tui = TuiState::new(Some("a@b.com".into()));
        type_str(&app, &mut tui, "password1");
        match send(&app, &mut tui, TuiEvent::Submit) {
            Some(Action::SubmitLogin { email, password }) => {
                assert_eq!(email, "a@b.com");
                assert_eq!(password.expose(), "password1");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ctrl_s_toggles_between_auth_screens() {
        let mut tui = TuiState::new(None);
        let mut app = login_app();
        assert!(matches!(
            send(&app, &mut tui, TuiEvent::ToggleAuthScreen),
            Some(Action::Navigate(Route::Signup))
        ));
        app.screen = Screen::Signup;
        assert!(matches!(
            send(&app, &mut tui, TuiEvent::ToggleAuthScreen),
            Some(Action::Navigate(Route::Login))
        ));
        assert_eq!(tui.auth_form.mode, AuthMode::Signup);
    }

    #[test]
    fn switching_screens_keeps_email_and_drops_password() {
        let mut tui = TuiState::new(None);
        let mut app = login_app();
        type_str(&app, &mut tui, "a@b.com");
        send(&app, &mut tui, TuiEvent::FocusNext);
        type_str(&app, &mut tui, "secret");

        app.screen = Screen::Signup;
        tui.sync_screen(&app);
        assert_eq!(tui.auth_form.email.value(), "a@b.com");
        assert!(tui.auth_form.password.value().is_empty());
    }

    #[test]
    fn dashboard_shortcuts() {
        let app = dashboard_app();
        let mut tui = TuiState::new(None);
        assert!(matches!(
            send(&app, &mut tui, TuiEvent::NewChat),
            Some(Action::NewChat)
        ));
        assert!(matches!(
            send(&app, &mut tui, TuiEvent::Logout),
            Some(Action::Logout)
        ));
    }

    #[test]
    fn input_submits_message_and_clears() {
        let app = dashboard_app();
        let mut tui = TuiState::new(None);
        type_str(&app, &mut tui, "Hello");
        match send(&app, &mut tui, TuiEvent::Submit) {
            Some(Action::SubmitMessage(text)) => assert_eq!(text, "Hello"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(tui.input_box.buffer().is_empty());
    }

    #[test]
    fn disabled_input_keeps_text() {
        let mut app = dashboard_app();
        app.thread.sending = true;
        let mut tui = TuiState::new(None);
        type_str(&app, &mut tui, "Hello");
        assert!(send(&app, &mut tui, TuiEvent::Submit).is_none());
        assert_eq!(tui.input_box.buffer(), "Hello");
    }

    #[test]
    fn tab_moves_focus_to_sidebar_for_selection() {
        let mut app = dashboard_app();
        app.sessions.sessions = vec![session("s1"), session("s2")];
        let mut tui = TuiState::new(None);

        send(&app, &mut tui, TuiEvent::FocusNext);
        assert_eq!(tui.focus, DashboardFocus::Sidebar);
        send(&app, &mut tui, TuiEvent::CursorDown);
        assert!(matches!(
            send(&app, &mut tui, TuiEvent::Submit),
            Some(Action::SelectSession(id)) if id == "s2"
        ));
        assert!(matches!(
            send(&app, &mut tui, TuiEvent::InputChar('n')),
            Some(Action::NewChat)
        ));

        // Typing other characters jumps back to the input
        send(&app, &mut tui, TuiEvent::InputChar('h'));
        assert_eq!(tui.focus, DashboardFocus::Input);
        assert_eq!(tui.input_box.buffer(), "h");
    }

    #[test]
    fn click_on_sidebar_row_selects_session() {
        let mut app = dashboard_app();
        app.sessions.sessions = vec![session("s1"), session("s2")];
        let mut tui = TuiState::new(None);

        // Row 0 is the title bar, row 1 the sidebar border
        assert!(matches!(
            send(&app, &mut tui, TuiEvent::MouseClick(5, 3)),
            Some(Action::SelectSession(id)) if id == "s2"
        ));
        assert_eq!(tui.focus, DashboardFocus::Sidebar);

        // Below the last item
        assert!(send(&app, &mut tui, TuiEvent::MouseClick(5, 10)).is_none());

        // Clicking the input takes focus back
        send(&app, &mut tui, TuiEvent::MouseClick(60, 22));
        assert_eq!(tui.focus, DashboardFocus::Input);
    }

    #[test]
    fn scroll_goes_to_message_list_from_any_focus() {
        let app = dashboard_app();
        let mut tui = TuiState::new(None);
        tui.sync_screen(&app);
        tui.focus = DashboardFocus::Sidebar;
        assert!(send(&app, &mut tui, TuiEvent::ScrollUp).is_none());
        assert!(!tui.message_list.stick_to_bottom);
    }

    #[test]
    fn dashboard_entry_resets_component_state() {
        let mut app = dashboard_app();
        let mut tui = TuiState::new(None);
        type_str(&app, &mut tui, "draft");
        tui.focus = DashboardFocus::Sidebar;

        app.screen = Screen::Login;
        tui.sync_screen(&app);
        app.screen = Screen::Dashboard;
        tui.sync_screen(&app);
        assert!(tui.input_box.buffer().is_empty());
        assert_eq!(tui.focus, DashboardFocus::Input);
    }
}
