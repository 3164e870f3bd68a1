//! reqwest implementation of [`ChatBackend`].
//!
//! One `reqwest::Client` with a cookie store is shared by every call, so the
//! session cookie set by `/login` or `/signup` rides along on everything that
//! follows. No token is kept in memory.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::ChatBackend;
use super::error::ApiError;
use super::types::{
    AuthStatus, BotReply, CreateSessionRequest, CreatedSession, Credentials, ErrorBody,
    LoginResponse, LogoutResponse, Message, SendMessageRequest, Session, SignupResponse,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// HTTP client for the HealthFirst JSON API.
pub struct HttpBackend {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// # Arguments
    /// * `base_url` - API root; a trailing slash is optional
    /// * `timeout` - Per-request timeout. `None` keeps the transport default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }

        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        info!("HTTP backend rooted at {}", base_url);
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, segments, None).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, segments, Some(body)).await
    }

    async fn request<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        debug!("{} {} -> {}", method, url, status);

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(ErrorBody::into_message);
            warn!(
                "Backend error: {} {} -> {} ({})",
                method,
                url.path(),
                status,
                message.as_deref().unwrap_or("no message")
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::Parse(format!("{} {}: {e}", method, url.path())))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        info!("Logging in as {}", email);
        self.post(&["login"], &Credentials { email, password }).await
    }

    async fn signup(&self, email: &str, password: &str) -> Result<SignupResponse, ApiError> {
        info!("Signing up {}", email);
        self.post(&["signup"], &Credentials { email, password }).await
    }

    async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        info!("Logging out");
        self.post(&["logout"], &serde_json::json!({})).await
    }

    async fn check_auth(&self) -> Result<AuthStatus, ApiError> {
        self.get(&["check-auth"]).await
    }

    async fn fetch_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let sessions: Vec<Session> = self.get(&["sessions"]).await?;
        debug!("Fetched {} sessions", sessions.len());
        Ok(sessions)
    }

    async fn create_session(&self, email: Option<&str>) -> Result<Session, ApiError> {
        let created: CreatedSession = self
            .post(&["sessions"], &CreateSessionRequest { email })
            .await?;

        match created.session_id {
            Some(session_id) if !session_id.is_empty() => {
                info!("Created session {}", session_id);
                Ok(Session {
                    session_id,
                    last_updated: created.last_updated,
                })
            }
            _ => {
                warn!("Session created but no session_id returned");
                Err(ApiError::MissingField("session_id"))
            }
        }
    }

    async fn fetch_messages(&self, session_id: &str) -> Result<Vec<Message>, ApiError> {
        let messages: Vec<Message> = self.get(&["sessions", session_id, "messages"]).await?;
        debug!("Fetched {} messages for {}", messages.len(), session_id);
        Ok(messages)
    }

    async fn send_message(&self, session_id: &str, text: &str) -> Result<BotReply, ApiError> {
        info!("Sending message to {} ({} bytes)", session_id, text.len());
        self.post(
            &["sessions", session_id, "messages"],
            &SendMessageRequest { message: text },
        )
        .await
    }
}
