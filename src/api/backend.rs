use async_trait::async_trait;

use super::error::ApiError;
use super::types::{
    AuthStatus, BotReply, LoginResponse, LogoutResponse, Message, Session, SignupResponse,
};

/// Everything the client needs from the HealthFirst backend.
///
/// Every call returns a typed result; callers decide whether to surface the
/// failure or degrade it with [`crate::api::fallback::Degrade`].
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the name of the backend (for logs).
    fn name(&self) -> &str;

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    async fn signup(&self, email: &str, password: &str) -> Result<SignupResponse, ApiError>;

    /// Clears the backend session cookie.
    async fn logout(&self) -> Result<LogoutResponse, ApiError>;

    async fn check_auth(&self) -> Result<AuthStatus, ApiError>;

    /// Sessions of the signed-in user, most recently updated first.
    async fn fetch_sessions(&self) -> Result<Vec<Session>, ApiError>;

    /// Creates a session. `email` is a legacy association hint; the backend
    /// identifies the user from the session cookie.
    async fn create_session(&self, email: Option<&str>) -> Result<Session, ApiError>;

    /// Messages of a session, oldest first.
    async fn fetch_messages(&self, session_id: &str) -> Result<Vec<Message>, ApiError>;

    /// Sends a user message and waits for the assistant's reply.
    async fn send_message(&self, session_id: &str, text: &str) -> Result<BotReply, ApiError>;
}
