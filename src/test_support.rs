//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::fallback::SIGNUP_SUCCESS;
use crate::api::types::UserInfo;
use crate::api::{
    ApiError, AuthStatus, BotReply, ChatBackend, LoginResponse, LogoutResponse, Message, Session,
    SignupResponse,
};
use crate::core::auth_gate::{AuthState, Route, Screen};
use crate::core::state::App;

#[derive(Default)]
struct FakeState {
    accounts: HashMap<String, String>,
    signed_in: Option<String>,
    sessions: Vec<Session>,
    messages: HashMap<String, Vec<Message>>,
    next_id: u32,
    calls: Vec<&'static str>,
}

/// In-memory backend with the same observable behavior as the real one:
/// accounts, a cookie-like signed-in user, sessions and an echoing bot.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
    failure: Option<ApiError>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .accounts
            .insert(email.to_string(), password.to_string());
        self
    }

    pub fn signed_in(self, email: &str) -> Self {
        self.state.lock().unwrap().signed_in = Some(email.to_string());
        self
    }

    pub fn with_sessions(self, sessions: Vec<Session>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for s in &sessions {
                state.messages.entry(s.session_id.clone()).or_default();
            }
            state.sessions = sessions;
        }
        self
    }

    pub fn with_messages(self, session_id: &str, messages: Vec<Message>) -> Self {
        self.state
            .lock()
            .unwrap()
            .messages
            .insert(session_id.to_string(), messages);
        self
    }

    /// Every call fails with `error`.
    pub fn failing_with(mut self, error: ApiError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Names of the backend calls made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn enter(&self, call: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(state),
        }
    }
}

fn api_error(status: u16, message: &str) -> ApiError {
    ApiError::Api {
        status,
        message: Some(message.to_string()),
    }
}

fn require_user(state: &FakeState) -> Result<(), ApiError> {
    match state.signed_in {
        Some(_) => Ok(()),
        None => Err(api_error(401, "User not authenticated")),
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let mut state = self.enter("login")?;
        let stored = state.accounts.get(email).cloned();
        match stored {
            None => Err(api_error(404, "User not found")),
            Some(stored) if stored.as_str() != password => Err(api_error(401, "Invalid password")),
            Some(_) => {
                state.signed_in = Some(email.to_string());
                Ok(LoginResponse {
                    verified: true,
                    error: None,
                    message: Some("Login successful".to_string()),
                    user: Some(UserInfo {
                        email: email.to_string(),
                        created_at: None,
                    }),
                })
            }
        }
    }

    async fn signup(&self, email: &str, password: &str) -> Result<SignupResponse, ApiError> {
        let mut state = self.enter("signup")?;
        if state.accounts.contains_key(email) {
            return Err(api_error(409, "Email already registered"));
        }
        state
            .accounts
            .insert(email.to_string(), password.to_string());
        Ok(SignupResponse {
            message: Some(SIGNUP_SUCCESS.to_string()),
            error: None,
        })
    }

    async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        let mut state = self.enter("logout")?;
        state.signed_in = None;
        Ok(LogoutResponse {
            message: Some("Logged out successfully".to_string()),
            redirect: Some("/login".to_string()),
        })
    }

    async fn check_auth(&self) -> Result<AuthStatus, ApiError> {
        let state = self.enter("check_auth")?;
        require_user(&state)?;
        Ok(AuthStatus {
            authenticated: true,
            email: state.signed_in.clone(),
        })
    }

    async fn fetch_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let state = self.enter("fetch_sessions")?;
        require_user(&state)?;
        Ok(state.sessions.clone())
    }

    async fn create_session(&self, _email: Option<&str>) -> Result<Session, ApiError> {
        let mut state = self.enter("create_session")?;
        require_user(&state)?;
        state.next_id += 1;
        let session = Session {
            session_id: format!("fake-session-{}", state.next_id),
            last_updated: None,
        };
        state.messages.insert(session.session_id.clone(), Vec::new());
        state.sessions.insert(0, session.clone());
        Ok(session)
    }

    async fn fetch_messages(&self, session_id: &str) -> Result<Vec<Message>, ApiError> {
        let state = self.enter("fetch_messages")?;
        require_user(&state)?;
        state
            .messages
            .get(session_id)
            .cloned()
            .ok_or_else(|| api_error(404, "Session not found"))
    }

    async fn send_message(&self, session_id: &str, text: &str) -> Result<BotReply, ApiError> {
        let mut state = self.enter("send_message")?;
        require_user(&state)?;
        let thread = state
            .messages
            .get_mut(session_id)
            .ok_or_else(|| api_error(404, "Session not found"))?;
        let reply = format!("echo: {text}");
        thread.push(Message::user(text));
        thread.push(Message::bot(reply.clone()));
        Ok(BotReply {
            bot_response: reply,
            user_message: Some(text.to_string()),
        })
    }
}

pub fn session(id: &str) -> Session {
    Session {
        session_id: id.to_string(),
        last_updated: None,
    }
}

/// A fresh app waiting for its auth check.
pub fn test_app() -> App {
    App::new(Route::Root)
}

/// Signed in as `a@b.com` on the dashboard with session `s1` active and idle.
pub fn dashboard_app() -> App {
    let mut app = test_app();
    app.auth = AuthState::Authenticated {
        email: Some("a@b.com".to_string()),
    };
    app.route = Route::Dashboard;
    app.screen = Screen::Dashboard;
    app.active_session_id = Some("s1".to_string());
    app.sessions.loaded = true;
    app.status_message.clear();
    app
}
