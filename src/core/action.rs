//! # Actions
//!
//! Everything that can happen in HealthFirst becomes an `Action`.
//! User presses Enter in the chat? That's `Action::SubmitMessage(text)`.
//! Backend replies? That's `Action::MessageSent { session_id, result }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state and returns an `Effect` describing the I/O to perform next. No I/O
//! happens here; `core::runtime` performs effects and feeds the results back
//! in as new actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Backend results arrive as typed `Result`s and are degraded to their safe
//! defaults here, so the choice of what to surface stays in one place.

use log::debug;

use crate::api::fallback::{Degrade, LoginOutcome, LogoutOutcome, SignupOutcome};
use crate::api::{
    ApiError, AuthStatus, BotReply, LoginResponse, LogoutResponse, Message, Secret, Session,
    SignupResponse,
};
use crate::core::auth_gate::{self, AuthState, Route, Screen};
use crate::core::state::{App, LoginForm, SessionStore, SignupForm};
use crate::core::validation::{validate_login, validate_signup};

pub const SIGNUP_NOTICE: &str = "Signup successful! Please login.";

const STATUS_LOADING_MESSAGES: &str = "Loading messages...";
const STATUS_WAITING_FOR_REPLY: &str = "Waiting for reply...";
const STATUS_LOGGING_OUT: &str = "Logging out...";

/// Why a session is being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Dashboard opened with no active session; the new id is adopted but
    /// not added to the sidebar list.
    Mount,
    /// "New Chat": prepended to the sidebar and selected.
    NewChat,
}

#[derive(Debug)]
pub enum Action {
    AppStarted,
    AuthChecked(Result<AuthStatus, ApiError>),
    Navigate(Route),
    SubmitLogin {
        email: String,
        password: Secret,
    },
    LoginFinished {
        email: String,
        result: Result<LoginResponse, ApiError>,
    },
    SubmitSignup {
        email: String,
        password: Secret,
        confirm: Secret,
    },
    SignupFinished(Result<SignupResponse, ApiError>),
    Logout,
    LogoutFinished(Result<LogoutResponse, ApiError>),
    SessionsLoaded(Result<Vec<Session>, ApiError>),
    NewChat,
    SessionCreated {
        origin: SessionOrigin,
        result: Result<Session, ApiError>,
    },
    SelectSession(String),
    MessagesLoaded {
        session_id: String,
        result: Result<Vec<Message>, ApiError>,
    },
    SubmitMessage(String),
    MessageSent {
        session_id: String,
        result: Result<BotReply, ApiError>,
    },
    Quit,
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AppStarted => "AppStarted",
            Action::AuthChecked(_) => "AuthChecked",
            Action::Navigate(_) => "Navigate",
            Action::SubmitLogin { .. } => "SubmitLogin",
            Action::LoginFinished { .. } => "LoginFinished",
            Action::SubmitSignup { .. } => "SubmitSignup",
            Action::SignupFinished(_) => "SignupFinished",
            Action::Logout => "Logout",
            Action::LogoutFinished(_) => "LogoutFinished",
            Action::SessionsLoaded(_) => "SessionsLoaded",
            Action::NewChat => "NewChat",
            Action::SessionCreated { .. } => "SessionCreated",
            Action::SelectSession(_) => "SelectSession",
            Action::MessagesLoaded { .. } => "MessagesLoaded",
            Action::SubmitMessage(_) => "SubmitMessage",
            Action::MessageSent { .. } => "MessageSent",
            Action::Quit => "Quit",
        }
    }
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    CheckAuth,
    Login {
        email: String,
        password: Secret,
    },
    Signup {
        email: String,
        password: Secret,
    },
    Logout,
    LoadSessions,
    CreateSession {
        origin: SessionOrigin,
        email: Option<String>,
    },
    LoadMessages {
        session_id: String,
    },
    SendMessage {
        session_id: String,
        text: String,
    },
    Batch(Vec<Effect>),
}

impl Effect {
    /// Collapses a list of effects, dropping `None`s.
    pub fn batch(effects: Vec<Effect>) -> Effect {
        let mut leaves: Vec<Effect> = effects.into_iter().flat_map(Effect::flatten).collect();
        match leaves.len() {
            0 => Effect::None,
            1 => leaves.remove(0),
            _ => Effect::Batch(leaves),
        }
    }

    /// The leaf effects in order, without `None`.
    pub fn flatten(self) -> Vec<Effect> {
        match self {
            Effect::None => Vec::new(),
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::flatten).collect(),
            leaf => vec![leaf],
        }
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::AppStarted => {
            if app.auth != AuthState::Loading {
                return Effect::None;
            }
            app.status_message = String::from("Loading...");
            Effect::CheckAuth
        }

        Action::AuthChecked(result) => {
            if app.auth != AuthState::Loading {
                debug!("Ignoring late auth check result");
                return Effect::None;
            }
            let status = result.degrade("check auth");
            app.auth = if status.authenticated {
                AuthState::Authenticated {
                    email: status.email,
                }
            } else {
                AuthState::Unauthenticated
            };
            app.status_message.clear();
            let route = app.route.clone();
            navigate(app, route)
        }

        Action::Navigate(route) => navigate(app, route),

        Action::SubmitLogin { email, password } => {
            if app.screen != Screen::Login || app.login.submitting {
                return Effect::None;
            }
            if let Some(error) = validate_login(&email, password.expose()) {
                app.login.error = Some(error.to_string());
                return Effect::None;
            }
            app.login.error = None;
            app.login.submitting = true;
            Effect::Login {
                email: email.trim().to_string(),
                password,
            }
        }

        Action::LoginFinished { email, result } => {
            app.login.submitting = false;
            if app.auth.is_authenticated() {
                return Effect::None;
            }
            let confirmed_email = result
                .as_ref()
                .ok()
                .and_then(|response| response.user.as_ref())
                .map(|user| user.email.clone())
                .unwrap_or(email);

            let outcome = LoginOutcome::from_result(result);
            if outcome.verified {
                app.auth = AuthState::Authenticated {
                    email: Some(confirmed_email),
                };
                app.login = LoginForm::default();
                navigate(app, Route::Dashboard)
            } else {
                app.login.error = outcome.error;
                Effect::None
            }
        }

        Action::SubmitSignup {
            email,
            password,
            confirm,
        } => {
            if app.screen != Screen::Signup || app.signup.submitting {
                return Effect::None;
            }
            if let Some(error) = validate_signup(&email, password.expose(), confirm.expose()) {
                app.signup.error = Some(error.to_string());
                return Effect::None;
            }
            app.signup.error = None;
            app.signup.submitting = true;
            Effect::Signup {
                email: email.trim().to_string(),
                password,
            }
        }

        Action::SignupFinished(result) => {
            app.signup.submitting = false;
            let outcome = SignupOutcome::from_result(result);
            if outcome.is_success() {
                app.signup = SignupForm::default();
                app.login = LoginForm {
                    notice: Some(SIGNUP_NOTICE.to_string()),
                    ..LoginForm::default()
                };
                return navigate(app, Route::Login);
            }
            match outcome {
                SignupOutcome::Rejected(error) => app.signup.error = Some(error),
                SignupOutcome::Registered(message) => {
                    debug!("Signup returned unexpected message: {message}");
                }
            }
            Effect::None
        }

        Action::Logout => {
            app.status_message = String::from(STATUS_LOGGING_OUT);
            Effect::Logout
        }

        Action::LogoutFinished(result) => {
            let outcome = LogoutOutcome::from_result(result);
            debug!("Logout outcome: {:?}", outcome);
            app.auth = AuthState::Unauthenticated;
            app.sessions = SessionStore::default();
            app.active_session_id = None;
            app.thread.clear();
            app.status_message.clear();
            navigate(app, Route::Login)
        }

        Action::SessionsLoaded(result) => {
            if app.screen != Screen::Dashboard {
                return Effect::None;
            }
            app.sessions.sessions = result.degrade("fetch sessions");
            app.sessions.loaded = true;
            Effect::None
        }

        Action::NewChat => {
            if app.screen != Screen::Dashboard {
                return Effect::None;
            }
            Effect::CreateSession {
                origin: SessionOrigin::NewChat,
                email: session_email(app),
            }
        }

        Action::SessionCreated { origin, result } => {
            if app.screen != Screen::Dashboard {
                return Effect::None;
            }
            let Some(session) = result.degrade_to_none("create session") else {
                return Effect::None;
            };
            match origin {
                SessionOrigin::Mount => {
                    if app.active_session_id.is_some() {
                        debug!("Session selected before mount creation finished; keeping it");
                        return Effect::None;
                    }
                    activate(app, session.session_id)
                }
                SessionOrigin::NewChat => {
                    let session_id = session.session_id.clone();
                    app.sessions.prepend(session);
                    activate(app, session_id)
                }
            }
        }

        Action::SelectSession(session_id) => {
            if app.screen != Screen::Dashboard {
                return Effect::None;
            }
            activate(app, session_id)
        }

        Action::MessagesLoaded { session_id, result } => {
            if !app.is_active(&session_id) {
                debug!("Discarding messages for inactive session {}", session_id);
                return Effect::None;
            }
            let messages = result.degrade("fetch messages");
            app.thread.replace(messages);
            app.thread.loading_history = false;
            refresh_status(app);
            Effect::None
        }

        Action::SubmitMessage(text) => {
            if app.screen != Screen::Dashboard || text.trim().is_empty() || app.input_disabled() {
                return Effect::None;
            }
            let Some(session_id) = app.active_session_id.clone() else {
                return Effect::None;
            };
            app.thread.messages.push(Message::user(text.clone()));
            app.thread.sending = true;
            refresh_status(app);
            Effect::SendMessage { session_id, text }
        }

        Action::MessageSent { session_id, result } => {
            app.thread.sending = false;
            if let Some(reply) = result.degrade_to_none("send message") {
                if app.is_active(&session_id) {
                    app.thread.messages.push(Message::bot(reply.bot_response));
                } else {
                    debug!("Reply for inactive session {} not shown", session_id);
                }
            }
            refresh_status(app);
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// Move to `route`, resolving it through the auth gate. Entering the
/// dashboard mounts it.
fn navigate(app: &mut App, route: Route) -> Effect {
    let screen = auth_gate::resolve(&route, &app.auth);
    debug!("Navigate {} -> {:?}", route, screen);
    let entering_dashboard = screen == Screen::Dashboard && app.screen != Screen::Dashboard;
    app.route = route;
    app.screen = screen;
    if entering_dashboard {
        mount_dashboard(app)
    } else {
        Effect::None
    }
}

fn mount_dashboard(app: &mut App) -> Effect {
    app.sessions.loaded = false;
    let create = if app.active_session_id.is_none() {
        Effect::CreateSession {
            origin: SessionOrigin::Mount,
            email: session_email(app),
        }
    } else {
        Effect::None
    };
    Effect::batch(vec![Effect::LoadSessions, create])
}

/// Make `session_id` the active session and load its history.
fn activate(app: &mut App, session_id: String) -> Effect {
    if app.is_active(&session_id) {
        return Effect::None;
    }
    app.active_session_id = Some(session_id.clone());
    app.thread.loading_history = true;
    refresh_status(app);
    Effect::LoadMessages { session_id }
}

fn session_email(app: &App) -> Option<String> {
    if app.attach_email_to_sessions {
        app.auth.email().map(str::to_string)
    } else {
        None
    }
}

fn refresh_status(app: &mut App) {
    app.status_message = if app.thread.sending {
        STATUS_WAITING_FOR_REPLY.to_string()
    } else if app.thread.loading_history {
        STATUS_LOADING_MESSAGES.to_string()
    } else {
        String::new()
    };
}
