//! # Application State
//!
//! Core business state for HealthFirst. Domain logic only, no TUI types.
//! Text typed into inputs lives in the `tui` module until it is submitted.
//!
//! ```text
//! App
//! ├── auth: AuthState               // loading / authenticated / unauthenticated
//! ├── route: Route                  // last requested route
//! ├── screen: Screen                // route resolved through the auth gate
//! ├── login: LoginForm              // error, notice, submitting
//! ├── signup: SignupForm            // error, submitting
//! ├── sessions: SessionStore        // sidebar sessions
//! ├── active_session_id: Option     // selected session
//! ├── thread: MessageThread         // messages of the active session
//! ├── status_message: String        // header bar text
//! └── attach_email_to_sessions      // legacy email hint on create
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::{Message, Session};
use crate::core::auth_gate::{AuthState, Route, Screen};
use crate::core::config::ResolvedConfig;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub error: Option<String>,
    /// Shown above the form after a successful signup.
    pub notice: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub error: Option<String>,
    pub submitting: bool,
}

/// Sessions of the signed-in user, in sidebar order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionStore {
    pub sessions: Vec<Session>,
    /// True once the first `fetch_sessions` of this dashboard mount returned.
    pub loaded: bool,
}

impl SessionStore {
    pub fn prepend(&mut self, session: Session) {
        self.sessions.insert(0, session);
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.iter().any(|s| s.session_id == session_id)
    }
}

/// Messages of the active session. Append-only except for a full
/// replacement when history is (re)loaded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageThread {
    pub messages: Vec<Message>,
    /// Bumped on every full replacement so views can drop cached layout.
    pub generation: u64,
    pub loading_history: bool,
    pub sending: bool,
}

impl MessageThread {
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
        self.loading_history = false;
        self.sending = false;
    }
}

pub struct App {
    pub auth: AuthState,
    pub route: Route,
    pub screen: Screen,
    pub login: LoginForm,
    pub signup: SignupForm,
    pub sessions: SessionStore,
    pub active_session_id: Option<String>,
    pub thread: MessageThread,
    pub status_message: String,
    pub attach_email_to_sessions: bool,
}

impl App {
    pub fn new(initial_route: Route) -> Self {
        Self {
            auth: AuthState::Loading,
            route: initial_route,
            screen: Screen::Loading,
            login: LoginForm::default(),
            signup: SignupForm::default(),
            sessions: SessionStore::default(),
            active_session_id: None,
            thread: MessageThread::default(),
            status_message: String::from("Loading..."),
            attach_email_to_sessions: false,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(Route::parse(&config.initial_route));
        app.attach_email_to_sessions = config.attach_email_to_sessions;
        app
    }

    /// The message input accepts text only when a session is active and
    /// nothing is in flight for it.
    pub fn input_disabled(&self) -> bool {
        self.active_session_id.is_none() || self.thread.loading_history || self.thread.sending
    }

    pub fn is_active(&self, session_id: &str) -> bool {
        self.active_session_id.as_deref() == Some(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.auth, AuthState::Loading);
        assert_eq!(app.screen, Screen::Loading);
        assert_eq!(app.route, Route::Root);
        assert!(app.sessions.sessions.is_empty());
        assert!(app.input_disabled());
    }

    #[test]
    fn input_enabled_with_idle_active_session() {
        let mut app = test_app();
        app.active_session_id = Some("s1".into());
        assert!(!app.input_disabled());

        app.thread.sending = true;
        assert!(app.input_disabled());

        app.thread.sending = false;
        app.thread.loading_history = true;
        assert!(app.input_disabled());
    }

    #[test]
    fn replace_bumps_generation() {
        let mut thread = MessageThread::default();
        thread.replace(vec![Message::user("hi")]);
        thread.replace(vec![Message::user("hi")]);
        assert_eq!(thread.generation, 2);
        thread.clear();
        assert!(thread.messages.is_empty());
        assert_eq!(thread.generation, 3);
    }

    #[test]
    fn prepend_puts_session_first() {
        let mut store = SessionStore::default();
        store.sessions.push(Session {
            session_id: "old".into(),
            last_updated: None,
        });
        store.prepend(Session {
            session_id: "new".into(),
            last_updated: None,
        });
        assert_eq!(store.sessions[0].session_id, "new");
        assert!(store.contains("old"));
        assert!(!store.contains("missing"));
    }
}
